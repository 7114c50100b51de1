use crate::models::Language;

pub const BULLET: &str = "• ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    GreetingReply,
    ServicesIntro,
    ServicesOutro,
    EstimateReply,
    BookingReply,
    StatusPrompt,
    InsuranceReply,
    TurnaroundReply,
    TipsIntro,
    DefaultReply,
    StatusReport,
    InitialGreeting,
    Apology,
    BrandName,
    BrandTagline,
    ChipGetEstimate,
    ChipListServices,
    ChipBookCarIn,
    ChipInsuranceHelp,
    ChipBookInspection,
    ChipShareDetails,
    ChipReferenceExample,
    ChipContactUs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKey {
    Services,
    Tips,
    Starters,
}

#[derive(Debug, Clone, Copy)]
pub struct Localized<T> {
    pub en: T,
    pub af: T,
}

impl<T: Copy> Localized<T> {
    pub fn get(&self, language: Language) -> T {
        match language {
            Language::En => self.en,
            Language::Af => self.af,
        }
    }
}

pub fn entry(key: MessageKey) -> Localized<&'static str> {
    let (en, af) = match key {
        MessageKey::GreetingReply => (
            "Welcome! We’re a trusted, family-run panelbeating and spray-painting centre. How can I help today?",
            "Welkom! Ons is ’n betroubare, familie-onderneming vir paneelklop en spuitverf. Hoe kan ek help vandag?",
        ),
        MessageKey::ServicesIntro => ("We offer:", "Ons bied aan:"),
        MessageKey::ServicesOutro => (
            "Would you like help with an estimate or booking?",
            "Wil jy help hê met ’n skatting of bespreking?",
        ),
        MessageKey::EstimateReply => (
            "Happy to help with an estimate. Please share: car make/model, year, damage type/location, and photos if possible.",
            "Graag help ek met ’n skatting. Deel asseblief: kar maak/model, jaar, tipe/ligging van skade, en foto’s indien moontlik.",
        ),
        MessageKey::BookingReply => (
            "Let’s book your car in. I’ll need: name, contact number, preferred date, car make/model, and a brief description of the issue.",
            "Kom ons maak ’n bespreking. Ek het nodig: naam, kontaknommer, voorkeurdatum, kar maak/model, en ’n kort beskrywing van die probleem.",
        ),
        MessageKey::StatusPrompt => (
            "Please share your job reference number (e.g., DJ-12345) and the vehicle registration to check the status.",
            "Deel asseblief jou werkverwysingsnommer (bv. DJ-12345) en die registrasienommer om die status na te gaan.",
        ),
        MessageKey::InsuranceReply => (
            "We work with major insurers and can assist with assessments and paperwork. I can help you prepare photos and details for a smooth claim.",
            "Ons werk met groot versekeraars en help met assesserings en papierwerk. Ek kan help om foto’s en besonderhede voor te berei vir ’n gladde eis.",
        ),
        MessageKey::TurnaroundReply => (
            "Typical turnaround: small dents 1–2 days, moderate repairs 3–5 days, major collision work 1–2 weeks. Paint curing can add time.",
            "Gewone omkeertyd: klein duike 1–2 dae, matige herstelwerk 3–5 dae, groot botsingswerk 1–2 weke. Verfgenesing kan tyd byvoeg.",
        ),
        MessageKey::TipsIntro => ("After-care tips:", "Ná-sorg wenke:"),
        MessageKey::DefaultReply => (
            "I can help with estimates, bookings, job updates, insurance assistance, and paint care tips. What would you like to do?",
            "Ek kan help met skattings, besprekings, werkopdaterings, versekeringhulp en verfsorg wenke. Waarmee kan ek help?",
        ),
        MessageKey::StatusReport => (
            "Status for {reference}: {stage}. Estimated completion in {lower}–{upper} days.",
            "Status vir {reference}: {stage}. Geskatte voltooiing oor {lower}–{upper} dae.",
        ),
        MessageKey::InitialGreeting => (
            "Welcome! I’m your assistant for De Jongh’s Panelbeating Centre. How can I help today?",
            "Welkom! Ek is jou assistent vir De Jongh’s Paneelklop Sentrum. Hoe kan ek help vandag?",
        ),
        MessageKey::Apology => (
            "Sorry, I had trouble responding. Please try again.",
            "Jammer, ek het probleme ondervind. Probeer asseblief weer.",
        ),
        MessageKey::BrandName => (
            "De Jongh’s Panelbeating Centre",
            "De Jongh’s Paneelklop Sentrum",
        ),
        MessageKey::BrandTagline => (
            "Trusted family-run panel beating and spray painting since 1989",
            "Betroubare familie-onderneming vir paneelklop en spuitverf sedert 1989",
        ),
        MessageKey::ChipGetEstimate => ("Get an estimate", "Kry ’n skatting"),
        MessageKey::ChipListServices => ("List services", "Lys dienste"),
        MessageKey::ChipBookCarIn => ("Book my car in", "Maak ’n bespreking"),
        MessageKey::ChipInsuranceHelp => ("Insurance claims help", "Hulp met versekeringseis"),
        MessageKey::ChipBookInspection => ("Book an inspection", "Boek ’n inspeksie"),
        MessageKey::ChipShareDetails => ("Share my details", "Deel my besonderhede"),
        MessageKey::ChipReferenceExample => ("My reference is DJ-12345", "My verwysing is DJ-12345"),
        MessageKey::ChipContactUs => ("Contact us", "Kontak ons"),
    };
    Localized { en, af }
}

pub fn list(key: ListKey) -> Localized<&'static [&'static str]> {
    match key {
        ListKey::Services => Localized {
            en: &[
                "Collision repair and panel beating",
                "Professional spray painting and colour matching",
                "Dent removal (PDR where suitable)",
                "Chassis measuring and straightening",
                "Rust treatment and prevention",
                "Full and partial resprays",
                "Polishing and paint correction",
                "Insurance claims assistance",
            ],
            af: &[
                "Botsingsherstel en paneelklopwerk",
                "Professionele spuitverf en kleurpassing",
                "Drukduik verwydering (PDR waar toepaslik)",
                "Chassis meting en reguitmaak",
                "Roesteremediëring en -voorkoming",
                "Volledige en gedeeltelike oorspuite",
                "Polering en verfkorreksie",
                "Versekeringseis ondersteuning",
            ],
        },
        ListKey::Tips => Localized {
            en: &[
                "Avoid automated car washes for 2 weeks after a respray; hand wash only.",
                "Use pH-neutral shampoo and microfiber mitts to protect the finish.",
                "Apply a quality paint sealant after 30 days for added protection.",
                "Address chips and scratches promptly to prevent rust.",
            ],
            af: &[
                "Vermy outo-wasplekke vir 2 weke ná ’n oorspuit; handwas net.",
                "Gebruik pH-neutrale sjampoe en mikrofiber-handskoene vir beskerming.",
                "Dien ’n kwaliteit verfseëlmiddel na 30 dae toe vir ekstra beskerming.",
                "Hanteer skyfies en krapmerke vinnig om roes te voorkom.",
            ],
        },
        ListKey::Starters => Localized {
            en: &[
                "What services do you offer?",
                "Can I get a repair estimate?",
                "Help with an insurance claim",
                "Book my car in",
                "Check my job status",
                "How long do repairs take?",
                "Paint care tips",
            ],
            af: &[
                "Watter dienste bied julle?",
                "Kan ek ’n skatting kry?",
                "Hulp met ’n versekeringseis",
                "Maak ’n bespreking",
                "Kontroleer my werkstatus",
                "Hoe lank neem herstelwerk?",
                "Verfsorg wenke",
            ],
        },
    }
}

pub fn text(key: MessageKey, language: Language) -> &'static str {
    entry(key).get(language)
}

pub fn texts(keys: &[MessageKey], language: Language) -> Vec<String> {
    keys.iter()
        .map(|key| text(*key, language).to_string())
        .collect()
}

pub fn items(key: ListKey, language: Language) -> &'static [&'static str] {
    list(key).get(language)
}

pub fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("{BULLET}{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
