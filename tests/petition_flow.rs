use genc_girisimci::checklist::ChecklistStore;
use genc_girisimci::config::{CHECKLIST_STEPS, STORAGE_KEY};
use genc_girisimci::petition::{FormField, PetitionFormData, PetitionGenerator, PetitionKind};
use genc_girisimci::storage::{KeyValueStore, MemoryStore};
use genc_girisimci::ValidationError;
use pretty_assertions::assert_eq;

fn filled_form() -> PetitionFormData {
    let mut data = PetitionFormData::default();
    let values = [
        (FormField::FullName, "Ayşe Yılmaz"),
        (FormField::Tckn, "12345678901"),
        (FormField::Address, "Cumhuriyet Mah. 12. Sok. No:3 Çankaya/Ankara"),
        (FormField::SgkCity, "Ankara"),
        (FormField::SgkDistrict, "Çankaya"),
        (FormField::WorkCity, "Ankara"),
        (FormField::WorkDistrict, "Çankaya"),
        (FormField::Profession, "Grafik Tasarımcı"),
        (FormField::StartDate, "2024-03-01"),
        (FormField::ApplicationDate, "2024-03-05"),
        (FormField::ApprovalDate, "2024-03-20"),
        (FormField::TaxOffice, "Çankaya Vergi Dairesi"),
        (FormField::DebtAmount, "8.450,00"),
        (FormField::PetitionDate, "2026-01-15"),
    ];
    for (field, value) in values {
        data.set(field, value);
    }
    data
}

#[test]
fn form_filled_through_field_table_generates_petition() {
    let mut generator = PetitionGenerator::new();
    let text = generator
        .generate(PetitionKind::from_name("sgk"), &filled_form())
        .unwrap()
        .to_string();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "ANKARA ÇANKAYA SOSYAL GÜVENLİK MÜDÜRLÜĞÜNE");
    assert_eq!(lines[3], "AD SOYAD : AYŞE YILMAZ");
    assert!(text.contains("Genç Girişimci Desteğinin 01.03.2025 tarihine kadar devamı"));
    assert!(text.contains("mesleğe başladığım tarih olan 01.03.2024 tarihinden 1 yıl sonrası olan 01.03.2025"));
    assert!(text.contains("Çankaya Vergi Dairesi tarafından 20.03.2024 tarihinde"));
    assert_eq!(lines.last().copied(), Some("Ayşe Yılmaz"));
    assert_eq!(generator.generated_text(), text);
}

#[test]
fn invalid_form_reports_prompt_and_keeps_previous_text() {
    let mut generator = PetitionGenerator::new();
    generator.generate(PetitionKind::Sgk, &filled_form()).unwrap();

    let mut incomplete = filled_form();
    incomplete.set(FormField::TaxOffice, "  ");
    let err = generator.generate(PetitionKind::Sgk, &incomplete).unwrap_err();
    assert_eq!(err, ValidationError::MissingField(FormField::TaxOffice));
    assert_eq!(err.to_string(), "Lütfen tüm alanları doldurun.");
    assert!(generator.generated_text().contains("AYŞE YILMAZ"));
}

#[test]
fn checklist_progress_survives_reload() {
    let storage = MemoryStore::new();
    {
        let mut store = ChecklistStore::open(&storage, STORAGE_KEY);
        store.toggle(CHECKLIST_STEPS[0].id);
        store.toggle(CHECKLIST_STEPS[2].id);
    }
    assert!(storage.get(STORAGE_KEY).unwrap().is_some());

    let store = ChecklistStore::open(&storage, STORAGE_KEY);
    let stats = store.stats(CHECKLIST_STEPS.len());
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.total, CHECKLIST_STEPS.len());
    assert_eq!(stats.percentage, Some(33));
    assert!(store.is_completed(CHECKLIST_STEPS[2].id));
    assert!(!store.is_completed(CHECKLIST_STEPS[1].id));
}
