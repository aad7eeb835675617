//! Static brand → model catalog.
//!
//! Brand keys are the lowercase identifiers the prediction service was trained
//! on; model strings are stored exactly as the service expects them. Order is
//! display order.

type BrandEntry = (&'static str, &'static [&'static str]);

const BRAND_MODELS: &[BrandEntry] = &[
    (
        "audi",
        &[
            "A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "Q2", "Q3", "Q5", "Q7", "Q8", "TT",
            "R8",
        ],
    ),
    (
        "bmw",
        &[
            "116d", "118d", "118i", "120d", "120i", "316d", "318d", "320d", "320i", "325d",
            "330d", "330i", "520d", "520i", "525d", "530d", "530i", "730d", "730i", "740d",
            "740i", "X1", "X2", "X3", "X4", "X5", "X6", "X7", "i3", "i4", "i8",
        ],
    ),
    (
        "chevrolet",
        &[
            "Spark", "Matiz", "Aveo", "Kalos", "Lacetti", "Cruze", "Epica", "Captiva", "Orlando",
            "Trax",
        ],
    ),
    (
        "citroen",
        &[
            "C1",
            "C2",
            "C3",
            "C3 Aircross",
            "C4",
            "C4 Cactus",
            "C4 Picasso",
            "C4 Grand Picasso",
            "C5",
            "C5 Aircross",
            "Berlingo",
            "Jumpy",
            "Jumper",
        ],
    ),
    (
        "dacia",
        &[
            "Logan",
            "Logan MCV",
            "Sandero",
            "Sandero Stepway",
            "Duster",
            "Lodgy",
            "Dokker",
            "Spring",
            "Jogger",
        ],
    ),
    (
        "fiat",
        &[
            "Panda",
            "500",
            "500C",
            "500L",
            "500X",
            "Grande Punto",
            "Punto",
            "Punto Evo",
            "Tipo",
            "Bravo",
            "Linea",
            "Doblo",
            "Qubo",
            "Fiorino",
        ],
    ),
    (
        "ford",
        &[
            "Ka",
            "Ka+",
            "Fiesta",
            "Focus",
            "Focus C-Max",
            "Mondeo",
            "Fusion",
            "B-Max",
            "C-Max",
            "S-Max",
            "Kuga",
            "EcoSport",
            "Edge",
            "Galaxy",
            "Transit Connect",
            "Ranger",
            "Puma",
        ],
    ),
    (
        "honda",
        &["Jazz", "Civic", "Insight", "Accord", "CR-V", "HR-V"],
    ),
    (
        "hyundai",
        &[
            "i10", "i20", "i30", "i40", "Accent", "Elantra", "Tucson", "Santa Fe", "Kona", "ix20",
            "ix35",
        ],
    ),
    (
        "kia",
        &[
            "Picanto", "Rio", "Ceed", "Ceed SW", "Carens", "Cerato", "Sportage", "Sorento",
            "Stonic", "Niro", "Optima",
        ],
    ),
    (
        "mazda",
        &[
            "2", "3", "5", "6", "MX-3", "MX-5", "CX-3", "CX-30", "CX-5", "CX-7",
        ],
    ),
    (
        "mercedes-benz",
        &[
            "A160", "A180", "A200", "B160", "B180", "B200", "C180", "C200", "C220", "C250",
            "C300", "E200", "E220", "E250", "E300", "E350", "S320", "S350", "S400", "S500",
            "GLA", "GLB", "GLC", "GLE", "GLS", "G-Class",
        ],
    ),
    (
        "mitsubishi",
        &[
            "Colt",
            "Lancer",
            "Lancer Evolution",
            "ASX",
            "Outlander",
            "Outlander PHEV",
            "Pajero",
        ],
    ),
    (
        "nissan",
        &[
            "Micra", "Note", "Almera", "Tiida", "Juke", "Qashqai", "X-Trail", "Leaf", "Navara",
        ],
    ),
    (
        "opel",
        &[
            "Agila",
            "Corsa",
            "Astra",
            "Meriva",
            "Zafira",
            "Zafira Tourer",
            "Insignia",
            "Vectra",
            "Mokka",
            "Mokka X",
            "Crossland X",
            "Grandland X",
            "Combo",
            "Vivaro",
        ],
    ),
    (
        "peugeot",
        &[
            "107", "108", "206", "207", "208", "306", "307", "308", "406", "407", "408", "508",
            "2008", "3008", "5008", "Partner", "Rifter",
        ],
    ),
    (
        "porche",
        &["Boxster", "Cayman", "911", "Panamera", "Macan", "Cayenne"],
    ),
    (
        "renault",
        &[
            "Twingo",
            "Clio",
            "Modus",
            "Megane",
            "Megane Sedan",
            "Megane Estate",
            "Fluence",
            "Talisman",
            "Laguna",
            "Captur",
            "Kadjar",
            "Koleos",
            "Scenic",
            "Grand Scenic",
            "Kangoo",
            "Trafic",
        ],
    ),
    (
        "seat",
        &[
            "Mii", "Ibiza", "Cordoba", "Leon", "Toledo", "Altea", "Ateca", "Arona", "Tarraco",
            "Alhambra",
        ],
    ),
    (
        "skoda",
        &[
            "Citigo",
            "Fabia",
            "Fabia Combi",
            "Rapid",
            "Rapid Spaceback",
            "Octavia",
            "Octavia Combi",
            "Superb",
            "Superb Combi",
            "Roomster",
            "Karoq",
            "Kodiaq",
            "Kamiq",
        ],
    ),
    (
        "suzuki",
        &[
            "Alto",
            "Celerio",
            "Swift",
            "Splash",
            "SX4",
            "SX4 S-Cross",
            "Vitara",
            "Grand Vitara",
            "Ignis",
            "Jimny",
        ],
    ),
    ("tesla", &["Model 3", "Model S", "Model X", "Model Y"]),
    (
        "toyota",
        &[
            "Aygo",
            "Yaris",
            "Corolla",
            "Auris",
            "Avensis",
            "Prius",
            "C-HR",
            "RAV4",
            "Highlander",
            "Land Cruiser",
            "Proace",
        ],
    ),
    (
        "volkswagen",
        &[
            "Up!",
            "Lupo",
            "Fox",
            "Polo",
            "Golf",
            "Golf Plus",
            "Golf Variant",
            "Jetta",
            "Bora",
            "Passat",
            "Passat Variant",
            "Arteon",
            "Touran",
            "Sharan",
            "T-Roc",
            "Tiguan",
            "Tiguan Allspace",
            "Touareg",
            "Transporter",
            "Caddy",
        ],
    ),
    (
        "volvo",
        &[
            "C30", "C70", "S40", "V40", "S60", "V60", "S80", "V70", "XC40", "XC60", "XC70",
            "XC90",
        ],
    ),
];

/// Display labels that the capitalisation rule does not produce on its own.
/// `porche` is the stored key; the public spelling is `Porsche`.
const LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("bmw", "BMW"),
    ("kia", "Kia"),
    ("tesla", "Tesla"),
    ("volvo", "Volvo"),
    ("volkswagen", "Volkswagen"),
    ("mercedes-benz", "Mercedes-Benz"),
    ("porche", "Porsche"),
];

/// Read-only lookup over the brand table.
#[derive(Debug)]
pub struct Catalog {
    entries: &'static [BrandEntry],
}

pub static CATALOG: Catalog = Catalog {
    entries: BRAND_MODELS,
};

impl Catalog {
    pub fn list_brands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(brand, _)| *brand)
    }

    /// Models for `brand` in display order; empty for an unknown or empty brand.
    pub fn models_of(&self, brand: &str) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(key, _)| *key == brand)
            .map(|(_, models)| *models)
            .unwrap_or(&[])
    }

    pub fn is_known_brand(&self, brand: &str) -> bool {
        self.entries.iter().any(|(key, _)| *key == brand)
    }

    pub fn contains(&self, brand: &str, model: &str) -> bool {
        self.models_of(brand).contains(&model)
    }

    pub fn label_of(&self, brand: &str) -> String {
        if let Some((_, label)) = LABEL_OVERRIDES.iter().find(|(key, _)| *key == brand) {
            return (*label).to_string();
        }
        capitalize(brand)
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(crate) fn label_overrides() -> &'static [(&'static str, &'static str)] {
    LABEL_OVERRIDES
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
