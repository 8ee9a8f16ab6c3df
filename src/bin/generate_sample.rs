/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Pick one item according to integer weights.
fn pick<'a, T>(rng: &mut SimpleRng, items: &'a [(T, u32)]) -> &'a T {
    let total: u32 = items.iter().map(|(_, w)| w).sum();
    let mut roll = (rng.next_f64() * f64::from(total)) as u32;
    for (item, weight) in items {
        if roll < *weight {
            return item;
        }
        roll -= weight;
    }
    &items[items.len() - 1].0
}

const HEADERS: [&str; 10] = [
    "VIN (1-10)",
    "County",
    "City",
    "State",
    "Postal Code",
    "Model Year",
    "Make",
    "Model",
    "Electric Vehicle Type",
    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
];

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

const ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";
const NOT_ELIGIBLE: &str = "Not eligible due to low battery range";
const UNKNOWN: &str = "Eligibility unknown as battery range has not been researched";

// (make, model, is_phev) with rough market-share weights.
const MODELS: &[((&str, &str, bool), u32)] = &[
    (("TESLA", "MODEL Y", false), 180),
    (("TESLA", "MODEL 3", false), 160),
    (("TESLA", "MODEL S", false), 40),
    (("TESLA", "MODEL X", false), 30),
    (("NISSAN", "LEAF", false), 90),
    (("CHEVROLET", "BOLT EV", false), 70),
    (("CHEVROLET", "VOLT", true), 50),
    (("FORD", "MUSTANG MACH-E", false), 45),
    (("FORD", "F-150 LIGHTNING", false), 20),
    (("KIA", "EV6", false), 35),
    (("KIA", "NIRO", true), 30),
    (("TOYOTA", "PRIUS PRIME", true), 55),
    (("TOYOTA", "RAV4 PRIME", true), 30),
    (("HYUNDAI", "IONIQ 5", false), 35),
    (("HYUNDAI", "KONA ELECTRIC", false), 25),
    (("BMW", "I3", false), 25),
    (("BMW", "X5", true), 20),
    (("VOLKSWAGEN", "ID.4", false), 35),
    (("RIVIAN", "R1T", false), 15),
    (("JEEP", "WRANGLER", true), 20),
    (("VOLVO", "XC90", true), 15),
];

// (city, county, state, postal code); mostly Washington, like the registry.
const CITIES: &[((&str, &str, &str, &str), u32)] = &[
    (("Seattle", "King", "WA", "98101"), 200),
    (("Bellevue", "King", "WA", "98004"), 90),
    (("Redmond", "King", "WA", "98052"), 70),
    (("Kirkland", "King", "WA", "98033"), 60),
    (("Tacoma", "Pierce", "WA", "98402"), 80),
    (("Vancouver", "Clark", "WA", "98661"), 70),
    (("Everett", "Snohomish", "WA", "98201"), 50),
    (("Spokane", "Spokane", "WA", "99201"), 45),
    (("Olympia", "Thurston", "WA", "98501"), 35),
    (("Bellingham", "Whatcom", "WA", "98225"), 30),
    (("Portland", "Multnomah", "OR", "97201"), 12),
    (("San Diego", "San Diego", "CA", "92101"), 8),
];

// Adoption ramps up toward recent years.
const YEARS: &[(&str, u32)] = &[
    ("2014", 8),
    ("2015", 10),
    ("2016", 14),
    ("2017", 20),
    ("2018", 32),
    ("2019", 40),
    ("2020", 48),
    ("2021", 80),
    ("2022", 110),
    ("2023", 130),
    ("2024", 95),
    ("2025", 40),
];

const CAFV_BEV: &[(&str, u32)] = &[(ELIGIBLE, 6), (UNKNOWN, 4)];
const CAFV_PHEV: &[(&str, u32)] = &[(ELIGIBLE, 5), (NOT_ELIGIBLE, 3), (UNKNOWN, 2)];

/// Ten VIN characters; real VINs never use I, O, or Q.
fn vin_prefix(rng: &mut SimpleRng) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";
    (0..10)
        .map(|_| CHARSET[(rng.next_u64() % CHARSET.len() as u64) as usize] as char)
        .collect()
}

fn main() {
    let n: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5000);

    let mut rng = SimpleRng::new(42);

    let output_path = "sample_ev_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(HEADERS).expect("Failed to write header");

    for _ in 0..n {
        let (make, model, is_phev) = *pick(&mut rng, MODELS);
        let (city, county, state, postal) = *pick(&mut rng, CITIES);
        let year = *pick(&mut rng, YEARS);
        let ev_type = if is_phev { PHEV } else { BEV };
        let cafv = *pick(&mut rng, if is_phev { CAFV_PHEV } else { CAFV_BEV });
        let vin = vin_prefix(&mut rng);

        writer
            .write_record([
                vin.as_str(),
                county,
                city,
                state,
                postal,
                year,
                make,
                model,
                ev_type,
                cafv,
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n} records to {output_path}");
}
