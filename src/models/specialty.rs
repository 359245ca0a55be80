//! Medical specialties of the department taxonomy
//!
//! The taxonomy is fixed at compile time: every specialty has a stable code
//! (used as the output column name) and the official Japanese department
//! name that free-text department mentions are matched against. Some names
//! overlap lexically (`内科` is contained in `心療内科`, `外科` in `整形外科`),
//! which is why matching is tie-aware.

use std::fmt;

macro_rules! specialties {
    ($($variant:ident = $number:literal => ($code:literal, $name:literal)),+ $(,)?) => {
        /// Canonical medical specialty
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Specialty {
            $(
                #[doc = $name]
                $variant = $number,
            )+
        }

        impl Specialty {
            /// Every specialty in taxonomy order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable code of this specialty
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Official department name
            #[must_use]
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

specialties! {
    InternalMedicine = 1 => ("internalmedicine", "内科"),
    PsychosomaticMedicine = 2 => ("psychosomaticmedicine", "心療内科"),
    Psychiatry = 3 => ("psychiatry", "精神科"),
    Neurology = 4 => ("neurology", "神経科"),
    Pulmonology = 5 => ("pulmonology", "呼吸器科"),
    Gastroenterology = 6 => ("gastroenterology", "消化器科"),
    Cardiology = 7 => ("cardiology", "循環器科"),
    Allergy = 8 => ("allergy", "アレルギー科"),
    Rheumatology = 9 => ("rheumatology", "リウマチ科"),
    Pediatrics = 10 => ("pediatrics", "小児科"),
    Surgery = 11 => ("surgery", "外科"),
    OrthopedicSurgery = 12 => ("orthopedicsurgery", "整形外科"),
    PlasticSurgery = 13 => ("plasticsurgery", "形成外科"),
    CosmeticSurgery = 14 => ("cosmeticsurgery", "美容外科"),
    Neurosurgery = 15 => ("neurosurgery", "脳神経外科"),
    ThoracicSurgery = 16 => ("thoracicsurgery", "呼吸器外科"),
    CardiovascularSurgery = 17 => ("cardiovasculursurgery", "心臓血管外科"),
    PediatricSurgery = 18 => ("pediatricsurgery", "小児外科"),
    DermatologyUrology = 19 => ("dermatologyurology", "皮膚泌尿器科"),
    Venereology = 20 => ("venereology", "性病科"),
    ColorectalSurgery = 21 => ("colorectalsurgery", "肛門科"),
    ObstetricsGynecology = 22 => ("obstetricsgynecology", "産婦人科"),
    Ophthalmology = 23 => ("ophthalmology", "眼科"),
    Otorhinolaryngology = 24 => ("otorhinolaryngology", "耳鼻咽喉科"),
    EsophagogastricSurgery = 25 => ("esophagogastricsurgery", "気管食道科"),
    Rehabilitation = 26 => ("rehabilitation", "ﾘﾊﾋﾞﾘﾃｰｼｮﾝ科"),
    Radiology = 27 => ("radiology", "放射線科"),
    NeurologyInternal = 28 => ("neurologyinternal", "神経内科"),
    GastroenterologyInternal = 29 => ("gastroenterologyinternal", "胃腸科"),
    Dermatology = 30 => ("dermatology", "皮膚科"),
    Urology = 31 => ("urology", "泌尿器科"),
    Obstetrics = 32 => ("obstetrics", "産科"),
    Gynecology = 33 => ("gynecology", "婦人科"),
    PulmonologyInternal = 34 => ("pulmonologyinternal", "呼吸器内科"),
    CardiologyInternal = 35 => ("cardiologyinternal", "循環器内科"),
    Dentistry = 36 => ("dentistry", "歯科"),
    Orthodontics = 37 => ("orthodontics", "歯科矯正科"),
    Pedodontics = 38 => ("pedodontics", "小児歯科"),
    OralMaxillofacialSurgery = 39 => ("oralmaxillofacialsurgery", "歯科口腔外科"),
    Diabetology = 40 => ("diabetology", "糖尿病科"),
    Nephrology = 41 => ("nephrology", "腎臓内科"),
    RenalTransplantation = 42 => ("renaltransplantation", "腎移植科"),
    Hemodialysis = 43 => ("hemodialysis", "血液透析科"),
    Metabolism = 44 => ("metabolism", "代謝内科"),
    Endocrinology = 45 => ("endocrinology", "内分泌内科"),
    EmergencyMedicine = 46 => ("emergencymedicine", "救急医学科"),
    Hematology = 47 => ("hematology", "血液科"),
    HematologyInternal = 48 => ("hematologyinternal", "血液内科"),
    Anesthesiology = 49 => ("anesthesiology", "麻酔科"),
    GastroenterologyInternal2 = 50 => ("gastroenterologyinternal2", "消化器内科"),
    GastrointestinalSurgery = 51 => ("gastrointestinalsurgery", "消化器外科"),
    HepatobiliaryPancreaticSurgery = 52 => ("hepatobilipancsurgery", "肝胆膵外科"),
    DiabetologyInternal = 53 => ("diabetologyinternal", "糖尿内科"),
    ColorectalSurgeryInternal = 54 => ("colorectalsurgeryinternal", "大腸肛門科"),
    OphthalmicPlasticOrbitalSurgery = 55 => ("ophthalmicplasticorbitalsurgery", "眼形成眼窩外科"),
    EndocrinologyInfertility = 56 => ("endocrinologyinfertility", "不妊内分泌科"),
    RheumatologyCollagenDisease = 57 => ("rheumatologycollagendisease", "膠原病ﾘｳﾏﾁ内科"),
    Stroke = 58 => ("stroke", "脳卒中科"),
    Oncology = 59 => ("oncology", "腫瘍治療科"),
    GeneralMedicine = 60 => ("generalmedicine", "総合診療科"),
    BreastThyroidSurgery = 61 => ("breastthyroidsurgery", "乳腺甲状腺外科"),
    Neonatology = 62 => ("neonatology", "新生児科"),
    PediatricCardiology = 63 => ("pediatriccardiology", "小児循環器科"),
}

impl Specialty {
    /// Numeric identifier of this specialty (1-based taxonomy position)
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
