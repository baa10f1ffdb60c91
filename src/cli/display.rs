//! Display utilities for the brushing timer.
//!
//! This module renders the session in the terminal:
//! - Timer ring (progress bar + `MM:SS`)
//! - Mouth diagram highlighting the current zone
//! - Tooth character
//! - Event messages, zone list and help

use std::io::IsTerminal;

use crate::session::{AudioChannel, SessionEvent};
use crate::types::{Arch, Side, Surface, TimerSnapshot, Zone, ZONES, ZONE_SECONDS};

/// Title shown on every frame.
const TITLE: &str = "C'est l'heure de se brosser les dents !";

/// Width of the timer ring bar, in cells.
const RING_WIDTH: usize = 24;

const TOOTH_WAITING: &str = r#"
    .-"""-.-"""-.
   (   o     o   )
    \     ◡     /
     |    |    |
     \___/ \___/
"#;

const TOOTH_HAPPY: &str = r#"
  *  .-"""-.-"""-.  *
    (   ^     ^   )
  *  \    \_/    /  *
      |    |    |
      \___/ \___/
"#;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders a full frame of the session.
    pub fn render_frame(snapshot: &TimerSnapshot) -> String {
        let mut lines = vec![TITLE.to_string(), String::new()];

        if snapshot.is_finished {
            lines.push(TOOTH_HAPPY.trim_end().to_string());
            lines.push(String::new());
            lines.push("Bravo ! Tes dents sont toutes propres !".to_string());
        } else {
            if !snapshot.is_active {
                lines.push(TOOTH_WAITING.trim_end().to_string());
                lines.push(String::new());
            }

            if snapshot.is_active {
                lines.push(format!("➜ {}", snapshot.zone_description));
                lines.push(String::new());
                lines.push(Self::render_mouth(snapshot.zone));
            } else {
                lines.push("Prêt(e) ?".to_string());
            }

            lines.push(String::new());
            lines.push(Self::render_ring(snapshot.progress, snapshot.remaining_seconds));
        }

        lines.push(String::new());
        lines.push(format!(
            "♪ Musique : {}",
            if snapshot.is_music_playing { "oui" } else { "non" }
        ));
        lines.push(Self::render_controls(snapshot));

        lines.join("\n")
    }

    /// Renders the timer ring as a bar followed by the remaining time.
    pub fn render_ring(progress: f64, remaining_seconds: u32) -> String {
        let filled = (progress.clamp(0.0, 1.0) * RING_WIDTH as f64).round() as usize;
        format!(
            "[{}{}] {}",
            "█".repeat(filled),
            "░".repeat(RING_WIDTH - filled),
            Self::format_time(remaining_seconds)
        )
    }

    /// Renders the mouth map with the current zone marked.
    pub fn render_mouth(current_zone: usize) -> String {
        let cell = |arch: Arch, surface: Surface, side: Side| -> &'static str {
            let zone = ZONES
                .iter()
                .find(|z| z.arch == arch && z.surface == surface && z.side == side);
            match zone {
                Some(zone) if zone.index == current_zone => "●",
                _ => "○",
            }
        };

        let row = |label: &str, arch: Arch| {
            format!(
                "  {:<6}   {}      {}        {}      {}",
                label,
                cell(arch, Surface::Outer, Side::Left),
                cell(arch, Surface::Outer, Side::Right),
                cell(arch, Surface::Inner, Side::Left),
                cell(arch, Surface::Inner, Side::Right),
            )
        };

        [
            "          Extérieur        Intérieur".to_string(),
            "        gauche droite    gauche droite".to_string(),
            row("Haut", Arch::Upper),
            row("Bas", Arch::Lower),
        ]
        .join("\n")
    }

    fn render_controls(snapshot: &TimerSnapshot) -> String {
        let toggle = if snapshot.is_finished {
            None
        } else if snapshot.is_active {
            Some("[Entrée] pause")
        } else {
            Some("[Entrée] démarrer")
        };

        toggle
            .into_iter()
            .chain(["[r] recommencer", "[m] musique", "[h] aide", "[q] quitter"])
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Returns the message to show for an event, if any.
    pub fn event_message(event: &SessionEvent) -> Option<String> {
        match event {
            SessionEvent::ZoneChanged { zone } => ZONES
                .get(*zone)
                .map(|z| format!("Zone suivante : {}", z.description)),
            SessionEvent::PlaybackFailed {
                channel: AudioChannel::Music,
                reason,
            } => Some(format!("La musique ne peut pas démarrer ({})", reason)),
            SessionEvent::PlaybackFailed {
                channel: AudioChannel::Chime,
                reason,
            } => Some(format!("Le son de fin ne peut pas être joué ({})", reason)),
            _ => None,
        }
    }

    /// Renders the zone list.
    pub fn render_zones(zones: &[Zone]) -> String {
        zones
            .iter()
            .map(|zone| {
                let start = zone.index as u32 * ZONE_SECONDS;
                format!(
                    "{}. {}  ({} - {})",
                    zone.index + 1,
                    zone.description,
                    Self::format_time(start),
                    Self::format_time(start + ZONE_SECONDS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Shows a frame, clearing the terminal first when attached to one.
    pub fn show_frame(snapshot: &TimerSnapshot) {
        if std::io::stdout().is_terminal() {
            print!("\x1b[2J\x1b[H");
        }
        println!("{}", Self::render_frame(snapshot));
    }

    /// Shows the message for an event, ringing the bell on zone changes
    /// and at the end.
    pub fn show_event(event: &SessionEvent) {
        if matches!(
            event,
            SessionEvent::ZoneChanged { .. } | SessionEvent::Finished
        ) && std::io::stdout().is_terminal()
        {
            print!("\x07");
        }
        if let Some(message) = Self::event_message(event) {
            println!("{}", message);
        }
    }

    /// Shows the zone list.
    pub fn show_zones() {
        println!("{}", Self::render_zones(&ZONES));
    }

    /// Shows the interactive help.
    pub fn show_help() {
        println!("Commandes (puis Entrée) :");
        println!("  (vide), p   démarrer / mettre en pause");
        println!("  r           recommencer");
        println!("  m           musique oui / non");
        println!("  z           liste des zones");
        println!("  h, ?        cette aide");
        println!("  q           quitter");
    }

    /// Shows a hint for unknown input.
    pub fn show_unknown(input: &str) {
        println!("Commande inconnue : {:?} (tape h pour l'aide)", input.trim());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Erreur : {}", message);
    }

    /// Formats seconds as `MM:SS`.
    pub fn format_time(total_seconds: u32) -> String {
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================
