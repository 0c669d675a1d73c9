use genc_girisimci::App;

fn main() {
    console_error_panic_hook::set_once();
    genc_girisimci::logger::init();
    log::info!("Genç Girişimciler Bilgilendirme Sitesi initialized");
    yew::Renderer::<App>::new().render();
}
