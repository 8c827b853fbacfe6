//! Palette inspection command

use std::process::ExitCode;

use super::{PaletteAction, EXIT_ERROR, EXIT_SUCCESS};
use crate::palettes::{list_themes, to_hex, Bucket, Theme};

/// Execute the palettes command
pub fn run_palettes(action: PaletteAction) -> ExitCode {
    match action {
        PaletteAction::List => {
            println!("Themes:");
            for name in list_themes() {
                println!("  {}", name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PaletteAction::Show { theme } => match Theme::from_name(&theme) {
            Some(theme) => {
                let palette = theme.palette();
                println!("Theme: {}", theme);
                println!();
                for bucket in [Bucket::Primary, Bucket::Secondary, Bucket::Accent] {
                    let colors: Vec<String> =
                        palette.bucket(bucket).iter().map(|c| to_hex(*c)).collect();
                    println!("  {:<10} {}", format!("{}:", bucket), colors.join(" "));
                }
                ExitCode::from(EXIT_SUCCESS)
            }
            None => {
                eprintln!("Error: Unknown theme '{}'", theme);
                eprintln!();
                eprintln!("Available themes:");
                for name in list_themes() {
                    eprintln!("  {}", name);
                }
                ExitCode::from(EXIT_ERROR)
            }
        },
    }
}
