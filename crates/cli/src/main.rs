#![deny(unsafe_code)]
//! CLI binary for the huebox color engine.
//!
//! Subcommands:
//! - `parse <input>`: parse a color and print every representation
//! - `validate <input>`: parse under widget policies, with localized errors
//! - `css <input>`: render CSS text
//! - `components <input>`: print the editable component table
//! - `hue <degrees>`: fully saturated color for a hue angle
//! - `names`: list CSS color keywords
//! - `palette <file>`: list or select named swatches from a JSON palette

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use huebox_core::{
    components, css_color, display_text, hue_to_rgb, parse, Catalog, Color, ColorInput,
    ColorModel, CssFormat, InputFormat, Palette, ValidationPolicy, Validator,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "huebox", about = "Color parsing, validation and formatting")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log engine decisions to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a color and print it in every representation.
    Parse {
        /// Color text ("#3f51b5", "teal", "hsl(210, 50%, 40%)") or JSON
        /// ("[255, 0, 0]", "{\"h\": 210, \"s\": 50, \"v\": 40}", "null").
        input: String,

        /// Model for three-component lists (rgb, hsv, hsl).
        #[arg(short, long)]
        model: Option<ColorModel>,
    },
    /// Parse a color under widget policies.
    Validate {
        input: String,

        /// Reject alpha in structured input and drop it from text input.
        #[arg(long)]
        no_alpha: bool,

        /// Reject free text other than hex (names, `rgb(...)`).
        #[arg(long)]
        no_plain: bool,

        /// Reject the "no color" state.
        #[arg(long)]
        no_none: bool,

        /// Policy as a JSON file; the flags above are added on top.
        #[arg(long)]
        policy: Option<PathBuf>,

        #[command(flatten)]
        locale: LocaleArgs,
    },
    /// Render a color as CSS.
    Css {
        input: String,

        /// Notation (hex, rgb, hsl).
        #[arg(short, long, default_value_t = CssFormat::Hex)]
        format: CssFormat,

        /// Include alpha when the color is not opaque.
        #[arg(long)]
        alpha: bool,
    },
    /// Print the editable component fields for a color.
    Components {
        input: String,

        /// Field set (hex, rgb, hsv, hsl).
        #[arg(short, long, default_value_t = InputFormat::Hex)]
        format: InputFormat,

        /// Leave out the alpha field.
        #[arg(long)]
        no_alpha: bool,

        #[command(flatten)]
        locale: LocaleArgs,
    },
    /// Fully saturated, full-value color for a hue angle.
    Hue {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// List CSS color keywords.
    Names,
    /// List or select swatches from a JSON palette file.
    Palette {
        file: PathBuf,

        /// Swatch to select.
        #[arg(short, long)]
        select: Option<String>,

        /// Validate swatches with alpha disabled.
        #[arg(long)]
        no_alpha: bool,

        #[command(flatten)]
        locale: LocaleArgs,
    },
}

#[derive(clap::Args)]
struct LocaleArgs {
    /// Locale for messages and labels.
    #[arg(long, default_value = "en")]
    locale: String,

    /// Translation catalog as a JSON file: {"fr": {"Wrong format": "..."}}.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl LocaleArgs {
    fn catalog(&self) -> Result<Catalog, CliError> {
        match &self.catalog {
            Some(path) => {
                let catalog = Catalog::from_json(&read_file(path)?)?;
                tracing::debug!(locales = ?catalog.locales(), "catalog loaded");
                Ok(catalog)
            }
            None => Ok(Catalog::new()),
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_file(path: &Path) -> Result<String, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("failed to read {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded file");
    Ok(text)
}

/// JSON shapes (lists, maps, `null`) are decoded as such; anything else is
/// color text.
fn read_input(arg: &str) -> Result<ColorInput, CliError> {
    let trimmed = arg.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') || trimmed == "null" {
        serde_json::from_str(trimmed)
            .map_err(|e| CliError::Input(format!("invalid color JSON: {e}")))
    } else {
        Ok(ColorInput::from_text(arg))
    }
}

fn ensure_valid(color: &Color) -> Result<(), CliError> {
    match color.error() {
        Some(e) => Err(CliError::Color(
            e,
            color.message().unwrap_or(e.key()).to_string(),
        )),
        None => Ok(()),
    }
}

fn print_color(color: &Color, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(color)?);
    } else {
        let [r, g, b] = color.rgb();
        let [h, s, v] = color.hsv();
        let [hh, ss, l] = color.hsl();
        println!("name:  {}", color.name());
        println!("hex:   #{}", color.hex());
        println!("rgb:   {r}, {g}, {b}");
        println!("hsv:   {h}, {s}, {v}");
        println!("hsl:   {hh}, {ss}, {l}");
        println!("alpha: {}", color.alpha());
        println!("css:   {}", color.css().background_color);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Parse { input, model } => {
            let color = parse(&read_input(&input)?, model);
            print_color(&color, cli.json)?;
            ensure_valid(&color)?;
        }
        Command::Validate {
            input,
            no_alpha,
            no_plain,
            no_none,
            policy,
            locale,
        } => {
            let mut rules = match &policy {
                Some(path) => serde_json::from_str::<ValidationPolicy>(&read_file(path)?)
                    .map_err(|e| CliError::Input(format!("invalid --policy JSON: {e}")))?,
                None => ValidationPolicy::default(),
            };
            rules.alpha_disabled |= no_alpha;
            rules.plain_color_disabled |= no_plain;
            rules.none_disabled |= no_none;

            let catalog = locale.catalog()?;
            let validator = Validator::new(rules, &catalog, &locale.locale);
            let color = validator.validate(&read_input(&input)?);
            print_color(&color, cli.json)?;
            ensure_valid(&color)?;
        }
        Command::Css {
            input,
            format,
            alpha,
        } => {
            let color = parse(&read_input(&input)?, None);
            ensure_valid(&color)?;
            let css = css_color(&color, format, alpha);
            if cli.json {
                let info = serde_json::json!({
                    "format": format.to_string(),
                    "css": css,
                    "text": display_text(&color, false),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{css}");
            }
        }
        Command::Components {
            input,
            format,
            no_alpha,
            locale,
        } => {
            let catalog = locale.catalog()?;
            let color = parse(&read_input(&input)?, None);
            ensure_valid(&color)?;
            let table = components(&color, format, no_alpha, &catalog, &locale.locale);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for field in &table {
                    let range = match (field.min, field.max) {
                        (Some(min), Some(max)) => format!("  [{min}..{max}]"),
                        _ => String::new(),
                    };
                    println!("{:<4} {}{}{range}", field.name, field.value, field.unit);
                }
            }
        }
        Command::Hue { degrees } => {
            let rgb = hue_to_rgb(degrees);
            let color = parse(&ColorInput::from(rgb.to_array().map(f64::from)), None);
            print_color(&color, cli.json)?;
        }
        Command::Names => {
            let names: Vec<&str> = huebox_core::names::list_names().collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Command::Palette {
            file,
            select,
            no_alpha,
            locale,
        } => {
            let palette = Palette::from_json(&read_file(&file)?)?;
            let catalog = locale.catalog()?;
            match select {
                Some(name) => {
                    let color = palette
                        .select(&name, &catalog, &locale.locale)
                        .ok_or_else(|| {
                            CliError::Input(format!(
                                "unknown swatch '{name}', expected one of: {}",
                                palette.names().collect::<Vec<_>>().join(", ")
                            ))
                        })?;
                    print_color(&color, cli.json)?;
                    ensure_valid(&color)?;
                }
                None => {
                    let swatches = palette.swatches(no_alpha, &catalog, &locale.locale);
                    if cli.json {
                        let info: serde_json::Map<String, serde_json::Value> = swatches
                            .iter()
                            .map(|(name, color)| Ok((name.clone(), serde_json::to_value(color)?)))
                            .collect::<Result<_, serde_json::Error>>()?;
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        for (name, color) in &swatches {
                            match color.message() {
                                Some(message) => println!("{name:<16} {message}"),
                                None => println!("{name:<16} {}", color.css().background_color),
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_input_decodes_json_shapes() {
        assert_eq!(
            read_input("[255, 0, 0]").ok(),
            Some(ColorInput::Triple(vec![255.0, 0.0, 0.0]))
        );
        assert_eq!(read_input("null").ok(), Some(ColorInput::Absent));
        assert!(matches!(
            read_input(r#"{"h": 10, "s": 20, "v": 30}"#),
            Ok(ColorInput::Keyed(_))
        ));
    }

    #[test]
    fn read_input_treats_other_text_as_color_text() {
        assert_eq!(read_input("teal").ok(), Some(ColorInput::from_text("teal")));
        assert_eq!(read_input("#abc").ok(), Some(ColorInput::from_text("#abc")));
    }

    #[test]
    fn read_input_rejects_malformed_json() {
        let err = read_input("[1, 2").err().map(|e| e.exit_code());
        assert_eq!(err, Some(12));
    }

    #[test]
    fn ensure_valid_maps_color_errors() {
        let color = parse(&ColorInput::from("nope"), None);
        let err = ensure_valid(&color).err().map(|e| e.exit_code());
        assert_eq!(err, Some(10));
        assert!(ensure_valid(&parse(&ColorInput::from("red"), None)).is_ok());
    }

    #[test]
    fn read_file_returns_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sky": "skyblue"}}"#).unwrap();
        let text = read_file(file.path()).ok();
        assert_eq!(text.as_deref(), Some(r#"{"sky": "skyblue"}"#));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("absent.json")).err().map(|e| e.exit_code());
        assert_eq!(err, Some(11));
    }

    #[test]
    fn catalog_is_loaded_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"fr": {{"Wrong format": "Format incorrect"}}}}"#).unwrap();
        let args = LocaleArgs {
            locale: "fr".to_string(),
            catalog: Some(file.path().to_path_buf()),
        };
        let catalog = args.catalog().ok().unwrap();
        assert_eq!(
            huebox_core::localize(&catalog, "Wrong format", "fr"),
            "Format incorrect"
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_hue_is_an_argument() {
        let cli = Cli::try_parse_from(["huebox", "hue", "-120"]).unwrap();
        assert!(matches!(cli.command, Command::Hue { degrees } if degrees == -120.0));
    }
}
