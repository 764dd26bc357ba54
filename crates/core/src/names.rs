//! Deterministic name and identifier pools for record synthesis.
//!
//! Everything here is pool-driven: the pools are fixed constants and
//! every draw comes from the run's `SeedStream`.

use crate::rng::SeedStream;

const VENDOR_STEMS: &[&str] = &[
    "Apex", "Meridian", "Sterling", "Cascade", "Pinnacle", "Vertex", "Horizon", "Summit",
    "Keystone", "Beacon", "Crestline", "Northgate", "Silverline", "Trident", "Orchid",
    "Falcon", "Granite", "Lakshmi", "Bharat", "Shree", "National", "United", "Precision",
    "Reliance", "Everest",
];

const VENDOR_KINDS: &[&str] = &[
    "Industries", "Traders", "Enterprises", "Supplies", "Logistics", "Engineering",
    "Components", "Solutions", "Exports", "Fabricators", "Agencies", "Mills",
];

const FIRST_NAMES: &[&str] = &[
    "Amit", "Priya", "Rahul", "Sneha", "Vikram", "Anita", "Suresh", "Kavita", "Rajesh",
    "Meera", "Arjun", "Divya", "Nikhil", "Pooja", "Sanjay", "Ritu", "Manoj", "Neha",
    "Deepak", "Shalini",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Iyer", "Reddy", "Gupta", "Singh", "Nair", "Desai", "Kulkarni",
    "Mehta", "Joshi", "Chopra", "Banerjee", "Rao", "Verma", "Kapoor",
];

const DEPARTMENTS: &[&str] = &[
    "Operations", "Maintenance", "IT", "Finance", "Production", "Quality", "Logistics",
    "Administration", "Projects", "R&D",
];

const ITEMS: &[&str] = &[
    "Industrial bearings", "Hydraulic pump assembly", "Steel fasteners (box)",
    "Control panel wiring", "Safety gloves (carton)", "Conveyor belt section",
    "Lubricant drum 200L", "Network switch 24-port", "Office furniture set",
    "Packaging film roll", "Calibration service", "Annual maintenance contract",
    "Forklift spare kit", "Electrical cabling 100m", "Air filter cartridge",
];

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn letters(rng: &mut SeedStream, n: usize) -> String {
    (0..n)
        .map(|_| LETTERS[rng.index(LETTERS.len())] as char)
        .collect()
}

fn digits(rng: &mut SeedStream, n: usize) -> String {
    (0..n)
        .map(|_| char::from(b'0' + rng.index(10) as u8))
        .collect()
}

pub fn vendor_name(rng: &mut SeedStream) -> String {
    format!("{} {}", rng.pick(VENDOR_STEMS), rng.pick(VENDOR_KINDS))
}

pub fn person_name(rng: &mut SeedStream) -> String {
    format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES))
}

pub fn department(rng: &mut SeedStream) -> String {
    (*rng.pick(DEPARTMENTS)).to_string()
}

pub fn item_description(rng: &mut SeedStream) -> String {
    (*rng.pick(ITEMS)).to_string()
}

/// 10-character PAN: 5 letters, 4 digits, 1 letter.
pub fn pan(rng: &mut SeedStream) -> String {
    format!("{}{}{}", letters(rng, 5), digits(rng, 4), letters(rng, 1))
}

/// 15-character GSTIN: 2-digit state code, embedded PAN, entity digit,
/// literal 'Z', check character.
pub fn gstin(rng: &mut SeedStream, pan: &str) -> String {
    let state = 1 + rng.index(36);
    format!("{:02}{}{}Z{}", state, pan, digits(rng, 1), letters(rng, 1))
}

/// 12-digit bank account number.
pub fn bank_account(rng: &mut SeedStream) -> String {
    digits(rng, 12)
}

/// 11-character IFSC routing code: 4 letters, '0', 6 digits.
pub fn ifsc(rng: &mut SeedStream) -> String {
    format!("{}0{}", letters(rng, 4), digits(rng, 6))
}

/// Bank transfer reference: "UTR" + 12 digits.
pub fn utr_reference(rng: &mut SeedStream) -> String {
    format!("UTR{}", digits(rng, 12))
}
