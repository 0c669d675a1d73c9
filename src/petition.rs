//! Petition generation: form record in, Turkish legal text out.
//!
//! Everything here is pure. Form values are taken as typed by the user; only
//! the fields the template shouts (`sgkCity`, `sgkDistrict`, `fullName` in the
//! header) are upper-cased.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The 14 inputs of the petition form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Tckn,
    Address,
    SgkCity,
    SgkDistrict,
    WorkCity,
    WorkDistrict,
    Profession,
    StartDate,
    ApplicationDate,
    ApprovalDate,
    TaxOffice,
    DebtAmount,
    PetitionDate,
}

/// How a field is rendered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
    TextArea,
}

impl FormField {
    pub const ALL: [FormField; 14] = [
        FormField::FullName,
        FormField::Tckn,
        FormField::Address,
        FormField::SgkCity,
        FormField::SgkDistrict,
        FormField::WorkCity,
        FormField::WorkDistrict,
        FormField::Profession,
        FormField::StartDate,
        FormField::ApplicationDate,
        FormField::ApprovalDate,
        FormField::TaxOffice,
        FormField::DebtAmount,
        FormField::PetitionDate,
    ];

    /// DOM id of the input, which is also the serialized field name.
    pub fn id(self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Tckn => "tckn",
            FormField::Address => "address",
            FormField::SgkCity => "sgkCity",
            FormField::SgkDistrict => "sgkDistrict",
            FormField::WorkCity => "workCity",
            FormField::WorkDistrict => "workDistrict",
            FormField::Profession => "profession",
            FormField::StartDate => "startDate",
            FormField::ApplicationDate => "applicationDate",
            FormField::ApprovalDate => "approvalDate",
            FormField::TaxOffice => "taxOffice",
            FormField::DebtAmount => "debtAmount",
            FormField::PetitionDate => "petitionDate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Ad Soyad",
            FormField::Tckn => "TC Kimlik No",
            FormField::Address => "Adres",
            FormField::SgkCity => "Bağlı Olduğunuz SGK İli",
            FormField::SgkDistrict => "Bağlı Olduğunuz SGK İlçesi",
            FormField::WorkCity => "İşyeri İli",
            FormField::WorkDistrict => "İşyeri İlçesi",
            FormField::Profession => "Meslek",
            FormField::StartDate => "Mükellefiyet Başlangıç Tarihi",
            FormField::ApplicationDate => "İstisna Başvuru Tarihi",
            FormField::ApprovalDate => "Vergi Dairesi Onay Tarihi",
            FormField::TaxOffice => "Vergi Dairesi",
            FormField::DebtAmount => "Yansıtılan Prim Borcu (TL)",
            FormField::PetitionDate => "Dilekçe Tarihi",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FormField::Address => InputKind::TextArea,
            FormField::StartDate
            | FormField::ApplicationDate
            | FormField::ApprovalDate
            | FormField::PetitionDate => InputKind::Date,
            _ => InputKind::Text,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raw petition form values. Dates are `YYYY-MM-DD` as produced by `<input type="date">`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PetitionFormData {
    pub full_name: String,
    pub tckn: String,
    pub address: String,
    pub sgk_city: String,
    pub sgk_district: String,
    pub work_city: String,
    pub work_district: String,
    pub profession: String,
    pub start_date: String,
    pub application_date: String,
    pub approval_date: String,
    pub tax_office: String,
    pub debt_amount: String,
    pub petition_date: String,
}

impl PetitionFormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Tckn => &self.tckn,
            FormField::Address => &self.address,
            FormField::SgkCity => &self.sgk_city,
            FormField::SgkDistrict => &self.sgk_district,
            FormField::WorkCity => &self.work_city,
            FormField::WorkDistrict => &self.work_district,
            FormField::Profession => &self.profession,
            FormField::StartDate => &self.start_date,
            FormField::ApplicationDate => &self.application_date,
            FormField::ApprovalDate => &self.approval_date,
            FormField::TaxOffice => &self.tax_office,
            FormField::DebtAmount => &self.debt_amount,
            FormField::PetitionDate => &self.petition_date,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Tckn => &mut self.tckn,
            FormField::Address => &mut self.address,
            FormField::SgkCity => &mut self.sgk_city,
            FormField::SgkDistrict => &mut self.sgk_district,
            FormField::WorkCity => &mut self.work_city,
            FormField::WorkDistrict => &mut self.work_district,
            FormField::Profession => &mut self.profession,
            FormField::StartDate => &mut self.start_date,
            FormField::ApplicationDate => &mut self.application_date,
            FormField::ApprovalDate => &mut self.approval_date,
            FormField::TaxOffice => &mut self.tax_office,
            FormField::DebtAmount => &mut self.debt_amount,
            FormField::PetitionDate => &mut self.petition_date,
        };
        *slot = value.into();
    }
}

/// Petition templates. Only the SGK premium-debt objection exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetitionKind {
    #[default]
    Sgk,
}

impl PetitionKind {
    /// Unknown names fall back to [`PetitionKind::Sgk`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "sgk" => PetitionKind::Sgk,
            other => {
                log::debug!("Unknown petition type '{}', using sgk", other);
                PetitionKind::Sgk
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PetitionKind::Sgk => "sgk",
        }
    }
}

/// `YYYY-MM-DD` → `DD.MM.YYYY` by text reordering. No calendar checks.
pub fn format_date(iso_date: &str) -> String {
    if iso_date.is_empty() {
        return String::new();
    }
    let mut parts = iso_date.split('-');
    let year = parts.next().unwrap_or_default();
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();
    format!("{}.{}.{}", day, month, year)
}

/// Reads `YYYY-MM-DD`, letting a day past the end of its month spill into the
/// next month (`2027-02-29` is 1 March 2027), as browser `Date` parsing does.
fn parse_iso_date(iso_date: &str) -> Option<NaiveDate> {
    let mut parts = iso_date.trim().split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let numeric = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(numeric(year, 4) && numeric(month, 2) && numeric(day, 2)) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// One calendar year after `iso_date`, as `DD.MM.YYYY`.
///
/// 29 February rolls over to 1 March when the next year is not a leap year.
/// Empty or unparseable input yields an empty string.
pub fn calculate_end_date(iso_date: &str) -> String {
    if iso_date.is_empty() {
        return String::new();
    }
    let Some(start) = parse_iso_date(iso_date) else {
        log::warn!("Cannot compute end date from '{}'", iso_date);
        return String::new();
    };
    let year = start.year() + 1;
    let end = start
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1));
    match end {
        Some(d) => d.format("%d.%m.%Y").to_string(),
        None => String::new(),
    }
}

fn tckn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{11}$").expect("static regex"))
}

/// Checks completeness first, then the ID format. Stops at the first problem.
pub fn validate(data: &PetitionFormData) -> Result<(), ValidationError> {
    if let Some(field) = FormField::ALL
        .into_iter()
        .find(|f| data.get(*f).trim().is_empty())
    {
        return Err(ValidationError::MissingField(field));
    }
    if !tckn_pattern().is_match(&data.tckn) {
        return Err(ValidationError::InvalidTckn);
    }
    Ok(())
}

pub fn is_valid(data: &PetitionFormData) -> bool {
    validate(data).is_ok()
}

/// Fills the SGK objection template. Does not validate.
pub fn generate_sgk_petition(data: &PetitionFormData) -> String {
    let start = format_date(&data.start_date);
    let end = calculate_end_date(&data.start_date);
    let application = format_date(&data.application_date);
    let approval = format_date(&data.approval_date);
    let petition_date = format_date(&data.petition_date);

    format!(
        r#"SOSYAL GÜVENLİK KURUMU BAŞKANLIĞI
{sgk_city_upper} {sgk_district_upper} SOSYAL GÜVENLİK MÜDÜRLÜĞÜNE

AD SOYAD : {full_name_upper}
TCKN : {tckn}
ADRES : {address}

KONU : Hukuka aykırı olarak tahakkuk ettirilen prim borcunun geri alınması ve Genç Girişimci Desteğinin {end} tarihine kadar devamı hususunda talepleri içerir dilekçedir.

{work_city} {work_district}'de {start} tarihinden beri {profession} mesleğini icra etmekteyim. İlgili şartları sağladığım için {application} Genç Girişimcilerde Kazanç İstisnası programına başvurdum ve {tax_office} tarafından {approval} tarihinde tarafıma tebliğ edilen:

'İlgi dilekçenize istinaden dairemiz kayıtları tetkik edildiğinde; {tckn} T.C kimlik numarası ile {start} tarihinden itibaren dairemiz mükellefi olduğunuz ve 193 Sayılı Gelir Vergisi Kanunu'nun mükerrer 20. maddesindeki "Genç Girişimcilerde Kazanç İstisnası " şartlarını taşıdığınız görülmüştür.'

şeklindeki kabul yazısını {sgk_district} SGK müdürlüğüne ibraz etmem akabinde ilgili genç girişimci desteğinden yararlanmaya başladım.

Genç girişimci desteğim devam etmekte iken 04/12/2025 tarihinde kabul edilen 7566 sayılı kanunun 23.Maddesi ile 5510 sayılı Kanunun 81 inci maddesinin birinci fıkrasının (k) bendi yürürlükten kaldırılmıştır.

İlgili kanunun mülga bendi aynen şöyledir:

"31/12/1960 tarihli ve 193 sayılı Gelir Vergisi Kanununun mükerrer 20 nci maddesi kapsamında genç girişimcilerde kazanç istisnasından faydalanan ve mükellefiyet başlangıç tarihi itibarıyla 18 yaşını doldurmuş ve 29 yaşını doldurmamış olanlardan, bu Kanunun 4 üncü maddesinin birinci fıkrasının (b) bendinin (1) numaralı alt bendi kapsamında 1/6/2018 tarihinden itibaren ilk defa sigortalı sayılan gerçek kişilerin primleri, 1 yıl süreyle 82 nci madde uyarınca belirlenen prime esas kazanç alt sınır üzerinden Hazinece karşılanır. Adi ortaklıklar ve şahıs şirket ortaklıklarında sadece bir ortak bu fıkra hükmünden yararlandırılır."

Kanun hükmünden de anlaşıldığı üzere şartları sağlayan gerçek kişilerin sigorta primleri 1 yıl süreyle devletçe karşılanmaktadır. Sigorta prim desteği 1 takvim yılı değil, 12 aylık süreyle uygulanmaktadır.

İlgili kanun 01.01.2026 tarihinde yürürlüğe girecek ve bu tarihten sonra yapılacak olan başvuruları kapsayacak şekilde Genç Girişimci Desteği kaldırılmıştır. Ancak normal şartlarda mesleğe başladığım tarih olan {start} tarihinden 1 yıl sonrası olan {end} tarihine kadar devam etmesi gereken Genç Girişimci Desteği 01.01.2026 tarihinde sona erdirilmiş ve tarafıma {debt_amount} TL tutarında prim borcu yansıtılmıştır.

Bu durum konu itibariyle hukuka aykırılık teşkil etmektedir. Ayrıca Anayasamızın 2.Maddesinde güvence altına alınan hukuk devleti ilkesinin en temel dayanaklarından birisi olan kazanılmış haklara saygı ilkesini ihlal etmiştir.

Tüm bu nedenlerle ilgili hukuka aykırı prim borcu tahakkuku işleminin baştan itibaren geri alınması ve desteğin sona ereceği tarih olan {end} tarihine kadar ilgili sigorta prim desteğinin devam ettirilmesi gerekmektedir.

TALEP VE SONUÇ:
1) Hukuka aykırı prim borcu tahakkukunun baştan itibaren GERİ ALINMASI,
2) Mülga edilen kanun bendinde belirtilen 1 yıllık sürenin bitimi olan {end} tarihine kadar sigorta primlerimin ÖDENMESİNE DEVAM EDİLMESİ'ni talep ediyorum.

{petition_date}

Ekler:
EK1 - Genç Girişimcilerde Kazanç İstisnası şartlarını taşıdığıma dair Vergi dairesi üst yazısı
EK2 - Haksız olarak tahakkuk ettirilen {debt_amount} TL tutarındaki prim borcunu gösterir görsel

{full_name}"#,
        sgk_city_upper = data.sgk_city.to_uppercase(),
        sgk_district_upper = data.sgk_district.to_uppercase(),
        full_name_upper = data.full_name.to_uppercase(),
        tckn = data.tckn,
        address = data.address,
        end = end,
        work_city = data.work_city,
        work_district = data.work_district,
        start = start,
        profession = data.profession,
        application = application,
        tax_office = data.tax_office,
        approval = approval,
        sgk_district = data.sgk_district,
        debt_amount = data.debt_amount,
        petition_date = petition_date,
        full_name = data.full_name,
    )
}

/// Holds the last successfully generated petition.
///
/// Owned by the UI; a rejected form leaves both the kind and the text as they were.
#[derive(Debug, Default)]
pub struct PetitionGenerator {
    current_kind: PetitionKind,
    generated_text: String,
}

impl PetitionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_kind(&self) -> PetitionKind {
        self.current_kind
    }

    /// Marks which petition the form is being filled for. Cosmetic while a
    /// single template exists.
    pub fn select(&mut self, kind: PetitionKind) {
        self.current_kind = kind;
    }

    /// Last generated text, empty before the first success.
    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    pub fn generate(
        &mut self,
        kind: PetitionKind,
        data: &PetitionFormData,
    ) -> Result<&str, ValidationError> {
        validate(data)?;
        self.current_kind = kind;
        self.generated_text = match kind {
            PetitionKind::Sgk => generate_sgk_petition(data),
        };
        log::info!("Generated {} petition", kind.name());
        Ok(&self.generated_text)
    }
}
