//! Build script for beefocus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and compiles it in as constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    generate_board_config(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Board settings after validation
struct BoardConfig {
    build: &'static str,
    baud: u32,
    enable_active_low: bool,
    home_active_low: bool,
}

/// Validate board.toml and write `board_config.rs` into OUT_DIR
fn generate_board_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&[format!("Failed to read board.toml: {}", e)]),
    };

    let table: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => fail(&e.to_string().lines().map(str::to_string).collect::<Vec<_>>()),
    };

    let board = validate(&table);

    let generated = format!(
        "/// Build selected in board.toml\n\
         pub const BUILD: Build = Build::{};\n\
         /// Command link baud rate\n\
         pub const BAUD_RATE: u32 = {};\n\
         pub const ENABLE_ACTIVE_LOW: bool = {};\n\
         pub const HOME_ACTIVE_LOW: bool = {};\n",
        board.build, board.baud, board.enable_active_low, board.home_active_low
    );

    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    f.write_all(generated.as_bytes()).unwrap();

    println!("cargo:warning=board.toml validated: {} build", board.build);
}

fn validate(config: &toml::Table) -> BoardConfig {
    let mut errors = Vec::new();

    let build = match config.get("focuser").and_then(|f| f.get("build")) {
        Some(toml::Value::String(name)) => match name.as_str() {
            "beefocus" => "Beefocus",
            "traditional" => "TraditionalFocuser",
            other => {
                errors.push(format!(
                    "[focuser] build must be 'beefocus' or 'traditional', not '{}'",
                    other
                ));
                "Beefocus"
            }
        },
        Some(_) => {
            errors.push("[focuser] build must be a string".to_string());
            "Beefocus"
        }
        None => {
            errors.push("[focuser] missing 'build'".to_string());
            "Beefocus"
        }
    };

    let baud = match config.get("uart").and_then(|u| u.get("baud")) {
        Some(toml::Value::Integer(baud)) if (1_200..=921_600).contains(baud) => *baud as u32,
        Some(toml::Value::Integer(_)) => {
            errors.push("[uart] baud must be 1200-921600".to_string());
            0
        }
        Some(_) => {
            errors.push("[uart] baud must be an integer".to_string());
            0
        }
        None => 115_200,
    };

    let enable_active_low = flag(config, "enable_active_low", true, &mut errors);
    let home_active_low = flag(config, "home_active_low", true, &mut errors);

    if !errors.is_empty() {
        fail(&errors);
    }

    BoardConfig {
        build,
        baud,
        enable_active_low,
        home_active_low,
    }
}

fn flag(config: &toml::Table, key: &str, default: bool, errors: &mut Vec<String>) -> bool {
    match config.get("pins").and_then(|p| p.get(key)) {
        Some(toml::Value::Boolean(value)) => *value,
        Some(_) => {
            errors.push(format!("[pins] {} must be true or false", key));
            default
        }
        None => default,
    }
}

fn fail(errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid board.toml                                       ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
