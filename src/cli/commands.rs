//! Command definitions for the brushing timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::BrushConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Brush Timer - two minutes of toothbrushing, zone by zone
#[derive(Parser, Debug)]
#[command(
    name = "brush-timer",
    version,
    about = "Minuteur de brossage des dents pour les enfants",
    long_about = "Deux minutes de brossage, découpées en 8 zones de 15 secondes.\n\
                  Le minuteur indique quelle partie de la bouche brosser, joue une musique \
                  si on le souhaite et félicite l'enfant à la fin.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive brushing session
    Run(RunArgs),

    /// List the brushing zones in session order
    Zones {
        /// Print the zones as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Audio file looped as background music (wav, mp3, ogg, flac)
    #[arg(long, value_name = "FILE")]
    pub music: Option<PathBuf>,

    /// Audio file played when brushing is done (wav, mp3, ogg, flac)
    #[arg(long, value_name = "FILE")]
    pub chime: Option<PathBuf>,

    /// Disable all sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Print JSON lines instead of the text display
    #[arg(long)]
    pub json: bool,
}

impl From<&RunArgs> for BrushConfig {
    fn from(args: &RunArgs) -> Self {
        Self {
            music_path: args.music.clone(),
            chime_path: args.chime.clone(),
            sound_enabled: !args.no_sound,
            json: args.json,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
