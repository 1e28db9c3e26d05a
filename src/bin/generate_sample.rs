use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;

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

// -- Wire format, matching what the viewer's loader expects --

#[derive(Serialize)]
struct WireRecord {
    image: WireImage,
    label: i64,
    true_label: String,
    xy: [f64; 2],
}

#[derive(Serialize)]
struct WireImage {
    dtype: &'static str,
    height: usize,
    width: usize,
    data: Vec<f64>,
}

const IMAGE_SIZE: usize = 32;
const POINTS_PER_CLUSTER: usize = 40;

/// Procedural "terrain" image: cluster base color plus per-pixel noise and a
/// diagonal shading gradient, so hover popups look distinct per cluster.
fn generate_image(base_rgb: [f64; 3], as_u8: bool, rng: &mut SimpleRng) -> WireImage {
    let mut data = Vec::with_capacity(IMAGE_SIZE * IMAGE_SIZE * 3);
    for row in 0..IMAGE_SIZE {
        for col in 0..IMAGE_SIZE {
            let shade = 0.6 + 0.4 * ((row + col) as f64 / (2 * IMAGE_SIZE) as f64);
            for channel in base_rgb {
                let v = (channel * shade + rng.gauss(0.0, 0.03)).clamp(0.0, 1.0);
                if as_u8 {
                    data.push((v * 255.0).round());
                } else {
                    data.push(v);
                }
            }
        }
    }
    WireImage {
        dtype: if as_u8 { "u8" } else { "f32" },
        height: IMAGE_SIZE,
        width: IMAGE_SIZE,
        data,
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (name, base color, 2-D blob center)
    let clusters: Vec<(&str, [f64; 3], [f64; 2])> = vec![
        ("meadow", [0.35, 0.65, 0.25], [-6.0, 4.0]),
        ("forest", [0.10, 0.35, 0.15], [5.0, 6.0]),
        ("coast", [0.20, 0.45, 0.75], [7.0, -4.0]),
        ("desert", [0.85, 0.75, 0.45], [-4.0, -6.0]),
        ("highland", [0.55, 0.50, 0.45], [0.0, 0.0]),
    ];

    let mut records = Vec::with_capacity(clusters.len() * POINTS_PER_CLUSTER);
    for (label, (name, base_rgb, center)) in clusters.iter().enumerate() {
        // Alternate buffer dtypes so both normalizer paths get exercised.
        let as_u8 = label % 2 == 0;
        for _ in 0..POINTS_PER_CLUSTER {
            records.push(WireRecord {
                image: generate_image(*base_rgb, as_u8, &mut rng),
                label: label as i64,
                true_label: name.to_string(),
                xy: [
                    rng.gauss(center[0], 1.2),
                    rng.gauss(center[1], 1.2),
                ],
            });
        }
    }

    let json = serde_json::to_vec(&records).expect("Failed to serialize records");

    std::fs::create_dir_all("artifacts").expect("Failed to create artifacts directory");
    let output_path = "artifacts/sample_clusters.json.gz";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(&json).expect("Failed to write artifact");
    encoder.finish().expect("Failed to finish gzip stream");

    println!(
        "Wrote {} records ({} clusters, {IMAGE_SIZE}x{IMAGE_SIZE} images) to {output_path}",
        records.len(),
        clusters.len()
    );
}
