//! Static keyword tables driving school detection, classification and contact extraction.
//!
//! All entries are lower-case. Matching is done against lower-cased tag values, so the
//! tables double as case-insensitive substring patterns. The primary-school table is also
//! compiled into the Overpass name regex, which is why no entry may contain `"`, `\` or
//! regex metacharacters.

/// Terms for "primary/elementary school" in one language.
pub struct LanguageKeywords {
    pub language: &'static str,
    pub keywords: &'static [&'static str],
}

pub static PRIMARY_SCHOOL_KEYWORDS: &[LanguageKeywords] = &[
    LanguageKeywords {
        language: "English",
        keywords: &[
            "primary school",
            "elementary school",
            "junior school",
            "infant school",
            "grade school",
            "primary",
            "elementary",
            "international school",
            "bilingual school",
            "school",
        ],
    },
    LanguageKeywords {
        language: "Norwegian",
        keywords: &[
            "grunn",
            "grunnskole",
            "barneskole",
            "folkeskole",
            "barneskule",
            "grunnskule",
        ],
    },
    LanguageKeywords {
        language: "Swedish",
        keywords: &["grundskola", "lågstadieskola", "lågstadium"],
    },
    LanguageKeywords {
        language: "Danish",
        keywords: &["folkeskole", "grundskole"],
    },
    LanguageKeywords {
        language: "Finnish",
        keywords: &["peruskoulu", "alakoulu", "ala-aste"],
    },
    LanguageKeywords {
        language: "Icelandic",
        keywords: &["grunnskóli"],
    },
    LanguageKeywords {
        language: "German",
        keywords: &["grundschule", "volksschule", "primarschule"],
    },
    LanguageKeywords {
        language: "Dutch",
        keywords: &["basisschool", "lagere school"],
    },
    LanguageKeywords {
        language: "French",
        keywords: &[
            "école primaire",
            "école élémentaire",
            "ecole primaire",
            "ecole elementaire",
        ],
    },
    LanguageKeywords {
        language: "Spanish",
        keywords: &["escuela primaria", "colegio de primaria", "escuela básica"],
    },
    LanguageKeywords {
        language: "Portuguese",
        keywords: &["escola primária", "escola básica", "ensino fundamental"],
    },
    LanguageKeywords {
        language: "Italian",
        keywords: &["scuola primaria", "scuola elementare"],
    },
    LanguageKeywords {
        language: "Polish",
        keywords: &["szkoła podstawowa"],
    },
    LanguageKeywords {
        language: "Czech",
        keywords: &["základní škola"],
    },
    LanguageKeywords {
        language: "Slovak",
        keywords: &["základná škola"],
    },
    LanguageKeywords {
        language: "Hungarian",
        keywords: &["általános iskola"],
    },
    LanguageKeywords {
        language: "Romanian",
        keywords: &["școala primară", "scoala primara"],
    },
    LanguageKeywords {
        language: "Serbo-Croatian",
        keywords: &["osnovna škola", "osnovna skola", "основна школа"],
    },
    LanguageKeywords {
        language: "Slovenian",
        keywords: &["osnovna šola"],
    },
    LanguageKeywords {
        language: "Bulgarian",
        keywords: &["основно училище", "начално училище"],
    },
    LanguageKeywords {
        language: "Russian",
        keywords: &["начальная школа"],
    },
    LanguageKeywords {
        language: "Ukrainian",
        keywords: &["початкова школа"],
    },
    LanguageKeywords {
        language: "Greek",
        keywords: &["δημοτικό σχολείο"],
    },
    LanguageKeywords {
        language: "Turkish",
        keywords: &["ilkokul", "ilköğretim"],
    },
    LanguageKeywords {
        language: "Estonian",
        keywords: &["põhikool", "algkool"],
    },
    LanguageKeywords {
        language: "Latvian",
        keywords: &["pamatskola", "sākumskola"],
    },
    LanguageKeywords {
        language: "Lithuanian",
        keywords: &["pradinė mokykla", "pagrindinė mokykla"],
    },
    LanguageKeywords {
        language: "Japanese",
        keywords: &["小学校"],
    },
    LanguageKeywords {
        language: "Chinese",
        keywords: &["小学", "小學"],
    },
    LanguageKeywords {
        language: "Korean",
        keywords: &["초등학교"],
    },
    LanguageKeywords {
        language: "Arabic",
        keywords: &["مدرسة ابتدائية"],
    },
    LanguageKeywords {
        language: "Persian",
        keywords: &["دبستان"],
    },
    LanguageKeywords {
        language: "Hebrew",
        keywords: &["בית ספר יסודי"],
    },
    LanguageKeywords {
        language: "Hindi",
        keywords: &["प्राथमिक विद्यालय"],
    },
    LanguageKeywords {
        language: "Indonesian",
        keywords: &["sekolah dasar"],
    },
    LanguageKeywords {
        language: "Malay",
        keywords: &["sekolah rendah", "sekolah kebangsaan"],
    },
    LanguageKeywords {
        language: "Vietnamese",
        keywords: &["trường tiểu học"],
    },
    LanguageKeywords {
        language: "Thai",
        keywords: &["โรงเรียนประถม"],
    },
    LanguageKeywords {
        language: "Filipino",
        keywords: &["paaralang elementarya"],
    },
    LanguageKeywords {
        language: "Swahili",
        keywords: &["shule ya msingi"],
    },
];

/// Names containing any of these denote secondary or higher education and are excluded,
/// even when they also contain a primary-school term.
pub static HIGHER_EDUCATION_KEYWORDS: &[&str] = &[
    // English
    "high school",
    "secondary",
    "middle school",
    "junior high",
    "sixth form",
    "college",
    "university",
    "polytechnic",
    "vocational",
    // Scandinavian
    "videregående",
    "vidaregåande",
    "ungdomsskole",
    "ungdomsskule",
    "gymnas",
    "högskola",
    "høgskole",
    "høyskole",
    "universitet",
    "yrkesskole",
    "lukio",
    "yläkoulu",
    "yliopisto",
    // German / Dutch
    "realschule",
    "hauptschule",
    "gesamtschule",
    "oberschule",
    "berufsschule",
    "hochschule",
    "universität",
    "middelbare school",
    "hogeschool",
    // Romance
    "collège",
    "lycée",
    "lycee",
    "université",
    "liceo",
    "secundaria",
    "universidad",
    "università",
    "escola secundária",
    "universidade",
    // Central / Eastern Europe
    "liceum",
    "lyceum",
    "gimnazjum",
    "gimnazija",
    "gymnázium",
    "gimnázium",
    "uniwersytet",
    "univerzita",
    "гимназия",
    "лицей",
    "колледж",
    "университет",
    "средняя школа",
    "гімназія",
    "ліцей",
    "γυμνάσιο",
    "λύκειο",
    // Turkish
    "lisesi",
    "ortaokul",
    "üniversite",
    // East Asia
    "中学",
    "中學",
    "高等学校",
    "高中",
    "大学",
    "大學",
    "중학교",
    "고등학교",
    "대학교",
];

/// `school=*` / `education=*` values that rule out a primary school.
pub static NON_PRIMARY_LEVEL_VALUES: &[&str] = &[
    "secondary",
    "lower_secondary",
    "upper_secondary",
    "high",
    "high_school",
    "middle",
    "middle_school",
    "college",
    "university",
    "tertiary",
    "higher_education",
    "vocational",
    "kindergarten",
    "preschool",
    "pre_school",
    "nursery",
    "adult",
];

/// `school=*` values naming the lowest education tier.
pub static LOWEST_TIER_VALUES: &[&str] = &["primary", "elementary"];

/// Exact tag values meaning a public operator.
pub static PUBLIC_TAG_VALUES: &[&str] = &[
    "public",
    "government",
    "governmental",
    "municipal",
    "municipality",
    "state",
    "national",
    "federal",
    "county",
    "regional",
    "local_authority",
    "public_school",
    "state_school",
    "kommune",
    "kommunal",
    "offentlig",
    "öffentlich",
    "staatlich",
    "publique",
    "público",
    "pública",
    "pubblica",
    "publiczna",
];

/// Exact tag values meaning a private operator.
pub static PRIVATE_TAG_VALUES: &[&str] = &[
    "private",
    "private_non_profit",
    "private_for_profit",
    "independent",
    "charter",
    "religious",
    "church",
    "catholic",
    "protestant",
    "islamic",
    "jewish",
    "ngo",
    "non_profit",
    "privat",
    "privée",
    "privado",
    "privada",
    "privata",
    "prywatna",
    "friskole",
];

/// Substrings in name/operator/ownership that suggest a private school.
pub static PRIVATE_HINTS: &[&str] = &[
    "private",
    "privat",
    "privad",
    "privé",
    "prywatn",
    "independent",
    "montessori",
    "waldorf",
    "steiner",
    "friskole",
    "friskola",
    "international",
    "internasjonal",
    "internationale",
    "bilingual",
    "boarding",
    "preparatory",
    "prep school",
    "catholic",
    "katolsk",
    "katholisch",
    "catholique",
    "católic",
    "cattolic",
    "christian",
    "kristen",
    "christlich",
    "chrétien",
    "evangel",
    "lutheran",
    "adventist",
    "islamic",
    "madrasa",
    "jewish",
    "yeshiva",
    "частн",
    "私立",
    "사립",
    "özel",
];

/// Substrings in name/operator/ownership that suggest a public school.
pub static PUBLIC_HINTS: &[&str] = &[
    "public",
    "government",
    "govt",
    "state school",
    "municipal",
    "kommune",
    "kommunal",
    "community",
    "county",
    "city of",
    "district",
    "gemeinde",
    "städtisch",
    "staatlich",
    "communale",
    "publique",
    "pública",
    "público",
    "pubblica",
    "statale",
    "comunale",
    "publiczna",
    "государствен",
    "муниципальн",
    "公立",
    "市立",
    "区立",
    "공립",
    "국립",
    "devlet",
    "negeri",
    "kebangsaan",
    "national school",
    // level-1 terms
    "primary",
    "elementary",
    "barneskole",
    "grunnskole",
    "folkeskole",
    "grundskola",
    "grundschule",
    "peruskoulu",
    "basisschool",
];

/// Tag keys naming the head of the school.
pub static CONTACT_PERSON_KEYS: &[&str] = &[
    "headteacher",
    "head_teacher",
    "contact:headteacher",
    "principal",
    "school:principal",
    "contact:principal",
    "headmaster",
    "rektor",
    "contact:rektor",
    "school:rektor",
    "rector",
    "director",
    "school:director",
    "directeur",
    "directrice",
    "direktor",
    "schulleiter",
    "schulleitung",
    "preside",
    "dirigente",
    "contact:person",
    "contact:name",
];

/// Structured e-mail tag keys.
pub static EMAIL_KEYS: &[&str] = &[
    "email",
    "contact:email",
    "operator:email",
    "school:email",
    "contact:e-mail",
    "e-mail",
];

/// Free-text tags that may mention an e-mail address or the principal.
pub static DESCRIPTION_KEYS: &[&str] = &[
    "description",
    "description:en",
    "note",
    "note:en",
    "comment",
];

/// Words that mark a clause as naming the head of the school.
pub static PRINCIPAL_KEYWORDS: &[&str] = &[
    "principal",
    "headteacher",
    "head teacher",
    "headmaster",
    "headmistress",
    "rektor",
    "rector",
    "director",
    "schulleiter",
    "directeur",
    "directrice",
    "preside",
    "dirigente",
    "rehtori",
    "igazgató",
    "ravnatelj",
    "dyrektor",
    "ředitel",
    "директор",
    "校長",
    "校长",
    "교장",
];

/// All primary-school keywords in table order, without duplicates.
pub fn primary_school_keywords() -> impl Iterator<Item = &'static str> {
    use itertools::Itertools;

    PRIMARY_SCHOOL_KEYWORDS
        .iter()
        .flat_map(|set| set.keywords.iter().copied())
        .unique()
}

/// First entry of `table` contained in `haystack`. `haystack` must already be lower-case.
pub fn find_in(haystack: &str, table: &[&'static str]) -> Option<&'static str> {
    table.iter().copied().find(|k| haystack.contains(k))
}
