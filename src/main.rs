mod audio;
mod audio_api;
mod config;
mod error;
mod loader;
mod middle;
mod pipeline;
mod shared;
mod tui;

use std::fs::File;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use simplelog::WriteLogger;

use audio_api::AudioOut;
use config::Config;
use loader::sample_loader::{self, DirSource, SoundSource};
use middle::{Middle, Outcome};
use pipeline::interval::Interval;
use tui::mode::TuiState;

const FRAME_PERIOD: Duration = Duration::from_millis(16); // ~60fps

fn main() {
    if let Err(e) = run() {
        log::error!("fatal: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("could not create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), file)
        .context("logger already initialized")?;
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_args();
    init_logging(&config)?;
    log::info!("starting: {config:?}");

    let audio = audio::start_audio(config.volume)?;
    let source: Arc<dyn SoundSource> = Arc::new(DirSource::new(&config.sounds_dir));
    let load_all = || {
        log::info!("loading sounds from {}", config.sounds_dir.display());
        sample_loader::spawn_load_all(Arc::clone(&source), audio.sample_rate(), audio.command_sender())
    };
    let mut load_reports = load_all();

    let mut middle = Middle::new(&config);
    let (cols, _rows) = terminal::size()?;
    middle.apply_width(cols);

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    crossterm::execute!(std::io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let mut tui_state = TuiState::default();
    let mut draw_timer = Interval::new(FRAME_PERIOD);
    draw(&mut term, &mut middle, &mut tui_state, &audio)?;
    draw_timer.arm(Instant::now());

    // One thread runs everything: the scheduler's timer, the draw timer and
    // input. Between deadlines we block on input.
    loop {
        for report in load_reports.try_iter() {
            middle.on_load_report(report);
        }

        let now = Instant::now();
        middle.poll_scheduler(&audio, now);
        if draw_timer.fire(now) {
            draw(&mut term, &mut middle, &mut tui_state, &audio)?;
        }

        let next_due = [middle.next_deadline(), draw_timer.next_due()]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(now + FRAME_PERIOD);
        let timeout = next_due.saturating_duration_since(Instant::now());

        for event in tui::input::poll_input(timeout, &mut tui_state)? {
            match middle.handle_input(event, &audio, Instant::now()) {
                Outcome::Continue => {}
                Outcome::Reload => load_reports = load_all(),
                Outcome::Quit => {
                    log::info!("quitting");
                    return Ok(());
                }
            }
        }
    }
}

fn draw(
    term: &mut Terminal<CrosstermBackend<Stdout>>,
    middle: &mut Middle,
    tui_state: &mut TuiState,
    audio: &impl AudioOut,
) -> anyhow::Result<()> {
    middle.sync_playhead(audio.current_time());
    let ds = middle.display_state();
    tui_state.sync(ds.grid.len(), ds.steps);
    let ts = &*tui_state;
    term.draw(|frame| {
        let area = frame.area();
        tui::view::render(frame, area, &ds, ts);
    })?;
    Ok(())
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
