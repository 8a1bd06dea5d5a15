//! Manual test harness for the desktop-automation primitives. Not part
//! of the library contract; every subcommand drives a real session.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use deskauto_platform::input::MouseButton;

#[derive(Parser, Debug)]
#[command(name = "deskauto")]
#[command(about = "Exercise mouse, keyboard, and capture primitives interactively")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DESKAUTO_LOG_LEVEL", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ButtonArg {
    Left,
    Middle,
    Right,
    X1,
    X2,
    Primary,
    Secondary,
}

impl From<ButtonArg> for MouseButton {
    fn from(b: ButtonArg) -> Self {
        match b {
            ButtonArg::Left => MouseButton::Left,
            ButtonArg::Middle => MouseButton::Middle,
            ButtonArg::Right => MouseButton::Right,
            ButtonArg::X1 => MouseButton::X1,
            ButtonArg::X2 => MouseButton::X2,
            ButtonArg::Primary => MouseButton::Primary,
            ButtonArg::Secondary => MouseButton::Secondary,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print display metrics and the button-swap state
    Metrics,
    /// Enumerate monitor bounds
    Displays {
        /// Emit JSON instead of one line per display
        #[arg(long)]
        json: bool,
    },
    /// Print the current cursor position
    Position,
    /// Set the cursor position
    MoveTo { x: i32, y: i32 },
    /// Move the cursor relative to its current position
    MoveBy { dx: i32, dy: i32 },
    /// Click at a position
    Click {
        x: i32,
        y: i32,
        #[arg(long, value_enum, default_value_t = ButtonArg::Left)]
        button: ButtonArg,
        /// 1 = single, 2 = double, 3 = triple
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Drag from the current position to a target
    Drag {
        x: i32,
        y: i32,
        #[arg(long, default_value_t = 1.0)]
        duration: f64,
        #[arg(long, value_enum, default_value_t = ButtonArg::Left)]
        button: ButtonArg,
    },
    /// Scroll at a position
    Scroll {
        x: i32,
        y: i32,
        notches: i32,
        #[arg(long)]
        horizontal: bool,
    },
    /// Type a string with the keyboard driver
    Type {
        text: String,
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Press a chord, e.g. `hotkey ctrl shift t`
    Hotkey {
        keys: Vec<String>,
        #[arg(long, default_value_t = 25)]
        interval_ms: u64,
    },
    /// Capture the screen to a PNG file
    Capture {
        out: std::path::PathBuf,
        /// Capture this monitor instead of a region
        #[arg(long)]
        display: Option<i32>,
        #[arg(long, default_value_t = 0)]
        x: i32,
        #[arg(long, default_value_t = 0)]
        y: i32,
        /// Region width; captures the whole primary display when absent
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    run(cli.command)
}

#[cfg(target_os = "windows")]
fn run(command: Commands) -> Result<()> {
    use deskauto_platform::screen::SystemState;
    use deskauto_platform::Rect;
    use deskauto_windows::screen::Win32SystemState;
    use deskauto_windows::{capture, dpi, input};
    use std::time::Duration;
    use tracing::info;

    dpi::ensure_dpi_aware();
    let state = Win32SystemState;

    match command {
        Commands::Metrics => {
            let (w, h) = state.primary_display_size();
            let offset = state.virtual_desktop_offset();
            let (vw, vh) = state.virtual_desktop_size();
            println!("primary display: {w}x{h}");
            println!("virtual desktop: {vw}x{vh} at ({}, {})", offset.x, offset.y);
            println!("buttons swapped: {}", state.buttons_swapped());
        }
        Commands::Displays { json } => {
            let mut bounds: Vec<Rect> = Vec::new();
            loop {
                let rect = state.display_bounds(bounds.len() as i32);
                if rect.is_empty() {
                    break;
                }
                bounds.push(rect);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&bounds)?);
            } else {
                for (i, r) in bounds.iter().enumerate() {
                    println!("display {i}: {}x{} at ({}, {})", r.width, r.height, r.left, r.top);
                }
            }
        }
        Commands::Position => {
            let p = input::mouse().position();
            println!("({}, {})", p.x, p.y);
        }
        Commands::MoveTo { x, y } => input::mouse().set_cursor_position(x, y),
        Commands::MoveBy { dx, dy } => input::mouse().move_by(dx, dy),
        Commands::Click { x, y, button, count } => {
            input::mouse().click_at(button.into(), x, y, count)?;
        }
        Commands::Drag { x, y, duration, button } => {
            input::mouse().drag_to(x, y, duration, button.into())?;
        }
        Commands::Scroll { x, y, notches, horizontal } => {
            let mouse = input::mouse();
            if horizontal {
                mouse.horizontal_scroll(x, y, notches);
            } else {
                mouse.scroll(x, y, notches);
            }
        }
        Commands::Type { text, interval_ms } => {
            input::keyboard().type_write(&text, interval_ms)?;
        }
        Commands::Hotkey { keys: names, interval_ms } => {
            let vks = names
                .iter()
                .map(|n| parse_key(n))
                .collect::<Result<Vec<u16>>>()?;
            input::keyboard().hot_key(Duration::from_millis(interval_ms), &vks)?;
        }
        Commands::Capture { out, display, x, y, width, height } => {
            let frame = if let Some(index) = display {
                capture::capture_display(index)?
            } else if let (Some(w), Some(h)) = (width, height) {
                capture::screen_shot(x, y, w, h)?
            } else {
                capture::capture_primary_display()?
            };
            info!(width = frame.width, height = frame.height, "captured");
            save_png(&frame, &out)?;
            println!("wrote {}", out.display());
        }
    }

    Ok(())
}

#[cfg(target_os = "windows")]
fn parse_key(name: &str) -> Result<u16> {
    use deskauto_platform::keys;

    let lower = name.to_ascii_lowercase();
    let vk = match lower.as_str() {
        "ctrl" | "control" => keys::CONTROL,
        "shift" => keys::SHIFT,
        "alt" => keys::ALT,
        "win" => keys::LEFT_WIN,
        "enter" | "return" => keys::ENTER,
        "tab" => keys::TAB,
        "esc" | "escape" => keys::ESCAPE,
        "space" => keys::SPACE,
        "backspace" => keys::BACKSPACE,
        "delete" | "del" => keys::DELETE,
        _ => {
            let c = match (lower.len(), lower.chars().next()) {
                (1, Some(c)) if c.is_ascii_alphanumeric() => c,
                _ => anyhow::bail!("unknown key name: {name}"),
            };
            c.to_ascii_uppercase() as u16
        }
    };
    Ok(vk)
}

#[cfg(target_os = "windows")]
fn save_png(frame: &deskauto_platform::Frame, out: &std::path::Path) -> Result<()> {
    use anyhow::Context;

    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .context("frame buffer does not match its dimensions")?;
    img.save(out)
        .with_context(|| format!("saving {}", out.display()))
}

#[cfg(not(target_os = "windows"))]
fn run(_command: Commands) -> Result<()> {
    anyhow::bail!("this harness drives the Win32 APIs and only runs on Windows")
}
