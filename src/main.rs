use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use skrynia::app::App;
use skrynia::config::Config;
use skrynia::event::{AppEvent, EventHandler};
use skrynia::logging;
use skrynia::prediction::selector;
use skrynia::session::view_state::Phase;
use skrynia::ui::components::chest::Chest;
use skrynia::ui::components::particles::ParticleLayer;
use skrynia::ui::components::skin_picker::SkinPicker;
use skrynia::ui::layout::{AppLayout, centered_fixed, hint_rows};
use skrynia::ui::skin::Skin;

#[derive(Parser)]
#[command(name = "skrynia", version, about = "Open the chest, learn your New Year prediction")]
struct Cli {
    #[arg(short, long, help = "Card skin (card, modern, classic, gradient)")]
    skin: Option<String>,

    #[arg(long = "lang", help = "Catalog language (en, uk)")]
    language: Option<String>,

    #[arg(long, help = "Path to a custom prediction catalog (TOML)")]
    catalog: Option<PathBuf>,

    #[arg(long, help = "Directory the card image is saved to")]
    export_dir: Option<PathBuf>,

    #[arg(long, help = "Pixel ratio of the saved image (1-4)")]
    scale: Option<u32>,

    #[arg(long, help = "Disable the falling snow")]
    no_snow: bool,

    #[arg(long, help = "Print one prediction and exit")]
    print: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More verbose logging (repeatable)")]
    verbose: u8,

    #[arg(long, help = "Log file (default: data dir/skrynia/skrynia.log)")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(name) = cli.skin {
        let skin: Skin = name.parse()?;
        config.skin = skin.as_str().to_string();
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path.to_string_lossy().to_string());
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir.to_string_lossy().to_string();
    }
    if let Some(scale) = cli.scale {
        config.export_scale = scale;
    }
    if cli.no_snow {
        config.snowfall = false;
    }
    config.normalize();

    let catalog = config.catalog()?;

    if cli.print {
        let mut rng = SmallRng::from_entropy();
        let entry = selector::select(catalog.entries(), &mut rng)?;
        println!("{} {}", entry.marker, entry.text);
        return Ok(());
    }

    let log_file = cli
        .log_file
        .unwrap_or_else(|| Config::data_dir().join("skrynia.log"));
    if let Err(err) = logging::init_logging(cli.verbose, &log_file) {
        eprintln!("Logging disabled: {err}");
    }
    tracing::info!(skin = %config.skin, language = %config.language, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(config, catalog, Rect::new(0, 0, size.width, size.height));
    let events = EventHandler::new(app.config.frame_interval());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = Config::remember_skin(&Config::config_path(), app.view.skin()) {
        tracing::warn!("could not save skin choice: {err}");
    }

    if let Err(err) = result {
        tracing::error!("exited with error: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, events),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(w, h) => app.resize(Rect::new(0, 0, w, h)),
            AppEvent::ExportFinished(result) => app.on_export_finished(result),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => app.open(Instant::now()),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('s') => {
            if app.view.phase() == Phase::Opened {
                // the worker reports back through the event channel
                let _ = app.request_export(events.sender());
            }
        }
        KeyCode::Tab | KeyCode::Right => app.next_skin(),
        KeyCode::BackTab | KeyCode::Left => app.prev_skin(),
        KeyCode::Char(ch) => {
            if let Some(skin) = Skin::from_digit(ch) {
                app.set_skin(skin);
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let strings = app.catalog.strings();
    let hints = match app.view.phase() {
        Phase::Closed => vec![
            format!("[Enter] {}", strings.open_label),
            format!("[1-4/Tab] {}", strings.skin_label),
            format!("[q] {}", strings.quit_label),
        ],
        Phase::Opened => vec![
            format!("[s] {}", strings.save_label),
            format!("[r] {}", strings.again_label),
            format!("[1-4/Tab] {}", strings.skin_label),
            format!("[q] {}", strings.quit_label),
        ],
    };
    let hint_lines = hint_rows(&hints, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            strings.title.clone(),
            Style::default()
                .fg(colors.title())
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, layout.header);

    match app.view.phase() {
        Phase::Closed => render_closed(frame, app, layout.main),
        Phase::Opened => {
            let surface = app.surface();
            let (w, h) = surface.size();
            frame.render_widget(&surface, centered_fixed(w, h, layout.main));
        }
    }

    frame.render_widget(
        SkinPicker::new(&app.palettes, app.view.skin(), &app.theme),
        layout.skins,
    );

    if let Some(status) = &app.status {
        let color = if status.is_error {
            colors.status_error()
        } else {
            colors.status_ok()
        };
        let line = Paragraph::new(Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(color),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(line, layout.status);
    }

    let footer = Paragraph::new(
        hint_lines
            .into_iter()
            .map(|row| Line::from(Span::styled(row, Style::default().fg(colors.muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, layout.footer);

    frame.render_widget(ParticleLayer::new(&app.effects, &app.theme), area);
}

fn render_closed(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let (_, chest_h) = Chest::size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(chest_h),
            Constraint::Min(0),
        ])
        .split(area);

    let pulse = if (app.frame / 20) % 2 == 0 {
        Modifier::BOLD
    } else {
        Modifier::DIM
    };
    let cta = Paragraph::new(Line::from(Span::styled(
        app.catalog.strings().call_to_action.clone(),
        Style::default().fg(colors.accent()).add_modifier(pulse),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(cta, rows[1]);
    frame.render_widget(Chest::new(&app.theme, app.frame), rows[2]);
}
