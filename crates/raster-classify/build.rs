use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Number of entries in each gamma table.
const LUT_SIZE: usize = 4096;

/// IEC 61966-2-1: gamma-encoded sRGB to linear light
fn decode_gamma(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1: linear light to gamma-encoded sRGB
fn encode_gamma(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(out: &mut impl Write, name: &str, f: fn(f64) -> f64) -> io::Result<()> {
    writeln!(out, "/// Index: input * {}.0", LUT_SIZE - 1)?;
    writeln!(out, "pub static {name}: [f32; {LUT_SIZE}] = [")?;
    for (i, chunk) in (0..LUT_SIZE).collect::<Vec<_>>().chunks(8).enumerate() {
        let row: Vec<String> = chunk
            .iter()
            .map(|&j| format!("{:.9}", f(j as f64 / (LUT_SIZE - 1) as f64) as f32))
            .collect();
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "    {},", row.join(", "))?;
    }
    writeln!(out, "\n];\n")
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let mut file = File::create(Path::new(&out_dir).join("gamma_lut.rs"))?;

    write_table(&mut file, "SRGB_TO_LINEAR", decode_gamma)?;
    write_table(&mut file, "LINEAR_TO_SRGB", encode_gamma)?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
