use film_calib::calib::{run_batch, CalibrationFiles};
use film_calib::config::{load_config, RuntimeConfig};
use film_calib::image::io::write_json_file;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: film_calib <config.json> | film_calib <image> [output_dir]".to_string()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let first = PathBuf::from(args.next().ok_or_else(usage)?);
    let config = if is_json(&first) {
        load_config(&first).map_err(|e| e.to_string())?
    } else {
        RuntimeConfig::for_image(first, args.next().map(PathBuf::from))
    };

    let inputs = config.all_inputs();
    let results = run_batch(&inputs, &config.output_dir, &config.calib);

    let mut ok: Vec<CalibrationFiles> = Vec::new();
    let mut failures = 0usize;
    for (input, res) in inputs.iter().zip(results) {
        match res {
            Ok(files) => {
                print_summary(&files);
                ok.push(files);
            }
            Err(err) => {
                eprintln!("{}: {err}", input.display());
                failures += 1;
            }
        }
    }

    if let Some(path) = &config.json_report {
        write_json_file(path, &ok).map_err(|e| e.to_string())?;
        println!("JSON report written to {}", path.display());
    }

    if failures > 0 {
        return Err(format!("{failures} of {} inputs failed", inputs.len()));
    }
    Ok(())
}

fn print_summary(files: &CalibrationFiles) {
    let r = &files.result;
    println!("{}", files.input.display());
    println!("  image: {}x{}", r.image_width, r.image_height);
    println!(
        "  scale: {:.3} px/mm (horizontal), {:.3} px/mm (vertical)",
        r.horizontal.pixels_per_mm, r.vertical.pixels_per_mm
    );
    for line in r.logs.to_strings() {
        println!("  {line}");
    }
    println!("  edge: {}", files.outputs.edge.display());
    println!("  overlay: {}", files.outputs.overlay.display());
}
