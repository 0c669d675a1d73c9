/// Campaign hashtag, without the leading `#`.
pub const HASHTAG: &str = "GençGirişimci";

/// localStorage key holding the checklist map.
pub const STORAGE_KEY: &str = "genc-girisimci-steps";

/// localStorage key set to `"true"` once the legal banner is closed.
pub const LEGAL_BANNER_KEY: &str = "legal-banner-dismissed";

pub const TWEET_TEMPLATE: &str = "Devletimizin 12 ay yanındayım sözüne güvenerek yola çıktık, yıla borç sürpriziyle uyandık. Kazanılmış haklar anayasal emanettir; devletimizin sözünde durarak #GençGirişimci'leri mağdur etmeyeceğine inanıyoruz.

@RTErdogan @isikhanvedat @csgbakanligi @sgksosyalmedya #Bağkur #SGK";

pub const SHARE_INTENT_BASE: &str = "https://twitter.com/intent/tweet";

/// Static list of posts to embed, served next to `index.html`.
pub const POSTS_URL: &str = "posts.json";

pub const SEARCH_FALLBACK_URL: &str = "https://twitter.com/search?q=%23GençGirişimci";

/// One row of the "what to do" checklist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChecklistStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CHECKLIST_STEPS: &[ChecklistStep] = &[
    ChecklistStep {
        id: "borc-kontrol",
        title: "Prim borcunuzu kontrol edin",
        description: "e-Devlet üzerinden SGK Tescil ve Hizmet Dökümü ile borç durumunuzu görüntüleyin, ekran görüntüsünü saklayın.",
    },
    ChecklistStep {
        id: "vergi-yazisi",
        title: "Vergi dairesi onay yazınızı hazırlayın",
        description: "Genç Girişimcilerde Kazanç İstisnası şartlarını taşıdığınızı gösteren üst yazının bir kopyasını edinin.",
    },
    ChecklistStep {
        id: "dilekce",
        title: "İtiraz dilekçenizi oluşturun",
        description: "Aşağıdaki dilekçe oluşturucu ile bilgilerinizi girerek dilekçenizi hazırlayın.",
    },
    ChecklistStep {
        id: "sgk-teslim",
        title: "Dilekçeyi SGK'ya iletin",
        description: "Dilekçenizi ekleriyle birlikte bağlı olduğunuz sosyal güvenlik müdürlüğüne elden veya KEP ile teslim edin, evrak numarasını not alın.",
    },
    ChecklistStep {
        id: "cimer",
        title: "CİMER başvurusu yapın",
        description: "Aynı talebi CİMER üzerinden de iletin.",
    },
    ChecklistStep {
        id: "paylas",
        title: "Sesinizi duyurun",
        description: "#GençGirişimci etiketiyle paylaşım yaparak kampanyaya destek olun.",
    },
];
