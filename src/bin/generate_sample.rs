//! Writes a synthetic wide-format reflectance library for trying the viewer.
//!
//! Usage: `generate_sample [OUTPUT]` (default `spc.csv`).

fn logistic(x: f64, mid: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-(x - mid) / steepness).exp())
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Green vegetation: chlorophyll bump in the visible, red edge near 710 nm,
/// water absorption dips in the SWIR.
fn vegetation(wl: f64, vigor: f64) -> f64 {
    let visible = 0.04 + gaussian(wl, 550.0, 35.0, 0.06 * vigor);
    let nir = 0.45 * vigor * logistic(wl, 710.0, 15.0);
    let water = gaussian(wl, 1450.0, 60.0, 0.25 * vigor) + gaussian(wl, 1940.0, 80.0, 0.3 * vigor);
    (visible + nir - water * logistic(wl, 1000.0, 50.0)).max(0.01)
}

/// Bare soil: a slow monotonic rise with weak clay absorption at 2200 nm.
fn soil(wl: f64, brightness: f64) -> f64 {
    let base = brightness * (0.08 + 0.25 * logistic(wl, 900.0, 400.0));
    (base - gaussian(wl, 2200.0, 30.0, 0.03 * brightness)).max(0.01)
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "spc.csv".to_string());
    let mut rng = SimpleRng::new(42);

    // Wavelengths: 350 → 2500 nm, step 10
    let wavelengths: Vec<u32> = (350..=2500).step_by(10).collect();

    let sites = ["north", "south", "east"];
    let covers = ["vegetation", "soil"];
    let replicates = 5;

    let mut writer = csv::Writer::from_path(&output_path).expect("Failed to create output file");

    let mut header = vec!["sample_id".to_string(), "site".to_string(), "cover".to_string()];
    header.extend(wavelengths.iter().map(|w| w.to_string()));
    writer.write_record(&header).expect("Failed to write header");

    let mut n_rows = 0;
    for site in &sites {
        for cover in &covers {
            for rep in 0..replicates {
                let level = (1.0 + rng.gauss(0.0, 0.15)).clamp(0.5, 1.5);

                let mut record = vec![format!("{site}_{cover}_{rep}"), site.to_string(), cover.to_string()];
                record.extend(wavelengths.iter().map(|&w| {
                    let wl = w as f64;
                    let r = match *cover {
                        "vegetation" => vegetation(wl, level),
                        _ => soil(wl, level),
                    };
                    format!("{:.5}", (r + rng.gauss(0.0, 0.003)).clamp(0.0, 1.0))
                }));
                writer.write_record(&record).expect("Failed to write row");
                n_rows += 1;
            }
        }
    }
    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {n_rows} spectra ({} wavelengths each) to {output_path}",
        wavelengths.len()
    );
}
