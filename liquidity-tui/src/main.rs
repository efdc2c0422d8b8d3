use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use liquidity_data::{
    ApiClient, ApiConfig, DashboardRow, DashboardState, Exchange, LiquidityRequest,
    LiquiditySlice, LogRecord, MetricsSnapshot,
    fmt::thousands,
    logs::format_cell,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info};

/// Work items for the fetcher task.
#[derive(Debug)]
enum FetchCommand {
    /// Fetch the row list and metrics for a freshly activated view.
    Activate(Exchange),
    /// Fetch the historical snapshot log.
    Logs(Exchange),
    /// Fetch the liquidity slice for a changed selection.
    Liquidity {
        exchange: Exchange,
        request: LiquidityRequest,
    },
}

/// Results flowing back from the fetcher task.
///
/// Each update is tagged with the exchange it was fetched for; results from
/// a view the user has already switched away from are dropped on arrival.
#[derive(Debug)]
enum FetchUpdate {
    Dashboard {
        exchange: Exchange,
        rows: Vec<DashboardRow>,
    },
    Metrics {
        exchange: Exchange,
        snapshot: MetricsSnapshot,
    },
    Logs {
        exchange: Exchange,
        records: Vec<LogRecord>,
    },
    Liquidity {
        exchange: Exchange,
        request: LiquidityRequest,
        slice: LiquiditySlice,
    },
}

/// Application state
struct App {
    state: DashboardState,
    search: String,
    searching: bool,
    show_logs: bool,
    cursor_row: usize,
    cursor_method: usize,
    logs_col_offset: usize,
    last_update: DateTime<Utc>,
}

impl App {
    fn new(exchange: Exchange) -> Self {
        Self {
            state: DashboardState::new(exchange),
            search: String::new(),
            searching: false,
            show_logs: false,
            cursor_row: 0,
            cursor_method: 0,
            logs_col_offset: 0,
            last_update: Utc::now(),
        }
    }

    /// Switch to another exchange: discard the whole view session.
    fn switch_exchange(&mut self, exchange: Exchange) {
        self.state.activate(exchange);
        self.search.clear();
        self.searching = false;
        self.show_logs = false;
        self.cursor_row = 0;
        self.cursor_method = 0;
        self.logs_col_offset = 0;
    }

    fn apply(&mut self, update: FetchUpdate) {
        match update {
            FetchUpdate::Dashboard { exchange, rows } => {
                if exchange != self.state.exchange {
                    debug!(%exchange, "dropping rows for inactive view");
                    return;
                }
                self.state.apply_dashboard(rows);
            }
            FetchUpdate::Metrics { exchange, snapshot } => {
                if exchange != self.state.exchange {
                    debug!(%exchange, "dropping metrics for inactive view");
                    return;
                }
                self.state.apply_metrics(snapshot);
            }
            FetchUpdate::Logs { exchange, records } => {
                if exchange != self.state.exchange {
                    debug!(%exchange, "dropping logs for inactive view");
                    return;
                }
                self.state.apply_logs(records);
            }
            FetchUpdate::Liquidity {
                exchange,
                request,
                slice,
            } => {
                if exchange != self.state.exchange {
                    debug!(%exchange, "dropping liquidity slice for inactive view");
                    return;
                }
                self.state.apply_liquidity(
                    &request.country,
                    &request.payment_methods,
                    request.seq,
                    slice,
                );
            }
        }
        self.last_update = Utc::now();
    }
}

/// Initial exchange from the first CLI argument (default: okx).
fn initial_exchange() -> Exchange {
    std::env::args()
        .nth(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(Exchange::Okx)
}

/// The terminal owns stdout in raw mode, so logs go to a file.
fn init_tracing() {
    if let Ok(file) = std::fs::File::create("liquidity-tui.log") {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .try_init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Restore the terminal even on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let exchange = initial_exchange();
    let app = Arc::new(Mutex::new(App::new(exchange)));

    let (cmd_tx, cmd_rx) = mpsc::channel::<FetchCommand>(64);
    let (update_tx, mut update_rx) = mpsc::channel::<FetchUpdate>(64);

    let client = ApiClient::new(ApiConfig::from_env());
    tokio::spawn(run_fetcher(client, cmd_rx, update_tx));

    {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            while let Some(update) = update_rx.recv().await {
                let mut guard = app.lock().await;
                guard.apply(update);
            }
        });
    }

    // Activate the initial view
    cmd_tx.send(FetchCommand::Activate(exchange)).await?;

    let res = run_app(&mut terminal, app, cmd_tx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

/// Fetcher task: executes commands one at a time, reporting results back.
///
/// Failures are logged and produce no update, leaving the view on whatever
/// it was displaying before (including the "Loading…" placeholders).
async fn run_fetcher(
    client: ApiClient,
    mut cmd_rx: mpsc::Receiver<FetchCommand>,
    update_tx: mpsc::Sender<FetchUpdate>,
) {
    while let Some(command) = cmd_rx.recv().await {
        match command {
            FetchCommand::Activate(exchange) => {
                info!(%exchange, "activating dashboard view");
                let (rows, snapshot) = tokio::join!(
                    client.fetch_dashboard(exchange),
                    client.fetch_metrics(exchange)
                );
                match rows {
                    Ok(rows) => {
                        let _ = update_tx
                            .send(FetchUpdate::Dashboard { exchange, rows })
                            .await;
                    }
                    Err(error) => error!(%error, %exchange, "dashboard fetch failed"),
                }
                match snapshot {
                    Ok(snapshot) => {
                        let _ = update_tx
                            .send(FetchUpdate::Metrics { exchange, snapshot })
                            .await;
                    }
                    Err(error) => error!(%error, %exchange, "metrics fetch failed"),
                }
            }
            FetchCommand::Logs(exchange) => {
                match client.fetch_logs(exchange).await {
                    Ok(records) => {
                        let _ = update_tx
                            .send(FetchUpdate::Logs { exchange, records })
                            .await;
                    }
                    Err(error) => error!(%error, %exchange, "logs fetch failed"),
                }
            }
            FetchCommand::Liquidity { exchange, request } => {
                match client
                    .fetch_liquidity(exchange, &request.country, &request.payment_methods)
                    .await
                {
                    Ok(slice) => {
                        let _ = update_tx
                            .send(FetchUpdate::Liquidity {
                                exchange,
                                request,
                                slice,
                            })
                            .await;
                    }
                    Err(error) => {
                        error!(%error, %exchange, country = %request.country, "liquidity fetch failed")
                    }
                }
            }
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    cmd_tx: mpsc::Sender<FetchCommand>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = std::time::Instant::now();

    loop {
        {
            let guard = app.lock().await;
            terminal.draw(|f| ui(f, &guard))?;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let mut guard = app.lock().await;

                if guard.searching {
                    match key.code {
                        KeyCode::Esc | KeyCode::Enter => guard.searching = false,
                        KeyCode::Backspace => {
                            guard.search.pop();
                            guard.cursor_row = 0;
                        }
                        KeyCode::Char(c) => {
                            guard.search.push(c);
                            guard.cursor_row = 0;
                        }
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('/') => {
                        guard.show_logs = false;
                        guard.searching = true;
                    }
                    KeyCode::Char('l') => {
                        guard.show_logs = !guard.show_logs;
                        if guard.show_logs {
                            guard.logs_col_offset = 0;
                            // Refetched on every open, like a view mount
                            let exchange = guard.state.exchange;
                            let _ = cmd_tx.send(FetchCommand::Logs(exchange)).await;
                        }
                    }
                    KeyCode::Char(c @ ('1' | '2' | '3')) => {
                        let exchange = match c {
                            '1' => Exchange::Okx,
                            '2' => Exchange::Binance,
                            _ => Exchange::Bybit,
                        };
                        if exchange != guard.state.exchange {
                            guard.switch_exchange(exchange);
                            let _ = cmd_tx.send(FetchCommand::Activate(exchange)).await;
                        }
                    }
                    KeyCode::Up => {
                        if guard.show_logs {
                            // Logs view is read-only; nothing to move
                        } else if guard.cursor_row > 0 {
                            guard.cursor_row -= 1;
                            guard.cursor_method = 0;
                        }
                    }
                    KeyCode::Down => {
                        if !guard.show_logs {
                            let visible = guard.state.filtered(&guard.search).len();
                            if visible > 0 && guard.cursor_row < visible - 1 {
                                guard.cursor_row += 1;
                                guard.cursor_method = 0;
                            }
                        }
                    }
                    KeyCode::Left => {
                        if guard.show_logs {
                            guard.logs_col_offset = guard.logs_col_offset.saturating_sub(1);
                        } else {
                            guard.cursor_method = guard.cursor_method.saturating_sub(1);
                        }
                    }
                    KeyCode::Right => {
                        if guard.show_logs {
                            let columns = guard
                                .state
                                .logs
                                .as_ref()
                                .map(|t| t.series.len())
                                .unwrap_or(0);
                            if columns > 0 && guard.logs_col_offset < columns - 1 {
                                guard.logs_col_offset += 1;
                            }
                        } else {
                            let methods = {
                                let filtered = guard.state.filtered(&guard.search);
                                filtered
                                    .get(guard.cursor_row)
                                    .map(|row| row.available_payment_methods.len())
                                    .unwrap_or(0)
                            };
                            if methods > 0 && guard.cursor_method < methods - 1 {
                                guard.cursor_method += 1;
                            }
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if !guard.show_logs {
                            let target = {
                                let filtered = guard.state.filtered(&guard.search);
                                filtered.get(guard.cursor_row).map(|row| {
                                    (
                                        row.country.clone(),
                                        row.available_payment_methods
                                            .get(guard.cursor_method)
                                            .map(|p| p.method.clone()),
                                    )
                                })
                            };
                            if let Some((country, Some(method))) = target {
                                let exchange = guard.state.exchange;
                                if let Some(request) = guard.state.toggle_method(&country, &method)
                                {
                                    let _ = cmd_tx
                                        .send(FetchCommand::Liquidity { exchange, request })
                                        .await;
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = std::time::Instant::now();
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(size);

    render_status_bar(f, chunks[0], app);
    render_metrics(f, chunks[1], app);
    render_search_bar(f, chunks[2], app);

    if app.show_logs {
        render_logs(f, chunks[3], app);
    } else {
        render_rows_table(f, chunks[3], app);
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let exchange = Span::styled(
        format!(" [{}] ", app.state.exchange.display_name()),
        Style::default()
            .fg(match app.state.exchange {
                Exchange::Okx => Color::Rgb(0, 120, 255),
                Exchange::Binance => Color::Rgb(240, 185, 11),
                Exchange::Bybit => Color::Rgb(255, 92, 0),
            })
            .add_modifier(Modifier::BOLD),
    );

    let title = Span::styled(
        " ◆ P2P LIQUIDITY TERMINAL ◆ ",
        Style::default()
            .fg(Color::Rgb(255, 215, 0))
            .add_modifier(Modifier::BOLD),
    );

    let time = Span::styled(
        format!(" ⏱  {} ", app.last_update.format("%H:%M:%S")),
        Style::default().fg(Color::Rgb(100, 149, 237)),
    );

    let help = Span::styled(
        " [1/2/3] Exchange  [/] Search  [L] History  [↵] Toggle Method  [Q] Quit ",
        Style::default().fg(Color::Rgb(128, 128, 128)),
    );

    let status_line = Line::from(vec![exchange, title, time, help]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(138, 43, 226)))
        .style(Style::default().bg(Color::Rgb(18, 18, 28)));

    let paragraph = Paragraph::new(status_line)
        .block(block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_metrics(f: &mut Frame, area: Rect, app: &App) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let metrics = app.state.metrics.as_ref();
    let values = [
        (
            "Total Liquidity (USDT)",
            metrics.map(|m| thousands(m.total_liquidity.round(), 0)),
        ),
        (
            "Total Countries",
            metrics.map(|m| m.total_countries.to_string()),
        ),
        (
            "Average Spread",
            metrics.map(|m| format!("{:.2}%", m.average_spread)),
        ),
        (
            "Unique Payment Methods",
            metrics.map(|m| m.unique_payment_methods_count.to_string()),
        ),
    ];

    for (idx, (label, value)) in values.into_iter().enumerate() {
        let (text, style) = match value {
            Some(v) => (
                v,
                Style::default()
                    .fg(Color::Rgb(255, 255, 255))
                    .add_modifier(Modifier::BOLD),
            ),
            None => (
                "Loading…".to_string(),
                Style::default()
                    .fg(Color::Rgb(128, 128, 150))
                    .add_modifier(Modifier::ITALIC),
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(100, 149, 237)))
            .title_top(
                Line::from(Span::styled(
                    format!(" {label} "),
                    Style::default().fg(Color::Rgb(200, 200, 220)),
                ))
                .alignment(Alignment::Center),
            )
            .style(Style::default().bg(Color::Rgb(15, 15, 25)));

        let paragraph = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(text, style)),
        ]))
        .block(block)
        .alignment(Alignment::Center);

        f.render_widget(paragraph, cells[idx]);
    }
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let prompt = if app.searching {
        Span::styled(
            format!(" 🔍 {}▌", app.search),
            Style::default().fg(Color::Rgb(255, 255, 255)),
        )
    } else if app.search.is_empty() {
        Span::styled(
            " 🔍 Search country… ",
            Style::default().fg(Color::Rgb(128, 128, 150)),
        )
    } else {
        Span::styled(
            format!(" 🔍 {} ", app.search),
            Style::default().fg(Color::Rgb(200, 200, 220)),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if app.searching {
            Color::Rgb(255, 215, 0)
        } else {
            Color::Rgb(80, 80, 100)
        }))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    f.render_widget(Paragraph::new(Line::from(prompt)).block(block), area);
}

fn render_rows_table(f: &mut Frame, area: Rect, app: &App) {
    let filtered = app.state.filtered(&app.search);

    let title = Line::from(vec![
        Span::styled(" 💧 ", Style::default().fg(Color::Rgb(100, 255, 218))),
        Span::styled(
            format!("{} LIQUIDITY", app.state.exchange.display_name().to_uppercase()),
            Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({}) ", filtered.len()),
            Style::default().fg(Color::Rgb(128, 128, 150)),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 255, 218)))
        .title_top(title.alignment(Alignment::Center))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    if filtered.is_empty() {
        let empty = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                if app.state.rows.is_empty() {
                    "⏳ Loading…"
                } else {
                    "No data found."
                },
                Style::default()
                    .fg(Color::Rgb(128, 128, 150))
                    .add_modifier(Modifier::ITALIC),
            )),
        ]))
        .block(block)
        .alignment(Alignment::Center);

        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        [
            "Date & Time",
            "Country",
            "Fiat",
            "Liquidity (USDT)",
            "VWAP",
            "Rate",
            "Spread",
            "Payment Methods",
        ]
        .into_iter()
        .map(|h| {
            Cell::from(Span::styled(
                h,
                Style::default()
                    .fg(Color::Rgb(255, 215, 0))
                    .add_modifier(Modifier::BOLD),
            ))
        }),
    )
    .height(1);

    let rows: Vec<Row> = filtered
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let display = app.state.row_display(row);
            let is_cursor = idx == app.cursor_row;

            // Aggregate liquidity is shown rounded; a specific slice keeps
            // its two decimals so the narrowing is visible.
            let liquidity_text = if display.specific {
                thousands(display.liquidity, 2)
            } else {
                thousands(display.liquidity.round(), 0)
            };
            let liquidity_style = if display.specific {
                Style::default()
                    .fg(Color::Rgb(186, 85, 211))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(255, 255, 255))
            };

            let methods_line = Line::from(
                row.available_payment_methods
                    .iter()
                    .enumerate()
                    .flat_map(|(m_idx, payment)| {
                        let active = row.is_active(&payment.method);
                        let mut style = if active {
                            Style::default()
                                .fg(Color::Rgb(186, 85, 211))
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Rgb(150, 150, 170))
                        };
                        if is_cursor && m_idx == app.cursor_method {
                            style = style.add_modifier(Modifier::UNDERLINED);
                        }
                        [
                            Span::styled(payment.method.clone(), style),
                            Span::raw("  "),
                        ]
                    })
                    .collect::<Vec<_>>(),
            );

            Row::new(vec![
                Cell::from(row.date_time.clone()),
                Cell::from(Span::styled(
                    row.country.clone(),
                    Style::default()
                        .fg(Color::Rgb(100, 200, 255))
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(row.fiat_currency.clone()),
                Cell::from(Span::styled(liquidity_text, liquidity_style)),
                Cell::from(thousands(display.vwap, 2)),
                Cell::from(thousands(row.exchange_rate, 2)),
                Cell::from(row.spread.clone()),
                Cell::from(methods_line),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(5),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Min(24),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .block(block);

    let mut table_state = TableState::default();
    table_state.select(Some(app.cursor_row));

    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(" 📜 ", Style::default().fg(Color::Rgb(255, 215, 0))),
        Span::styled(
            format!(
                "{} LIQUIDITY SNAPSHOTS",
                app.state.exchange.display_name().to_uppercase()
            ),
            Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " [←/→] Columns  [L] Back ",
            Style::default().fg(Color::Rgb(128, 128, 150)),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 215, 0)))
        .title_top(title.alignment(Alignment::Center))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    let Some(table) = app.state.logs.as_ref().filter(|t| !t.is_empty()) else {
        let waiting = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                "⏳ Loading…",
                Style::default()
                    .fg(Color::Rgb(128, 128, 150))
                    .add_modifier(Modifier::ITALIC),
            )),
        ]))
        .block(block)
        .alignment(Alignment::Center);

        f.render_widget(waiting, area);
        return;
    };

    // One fixed timestamp column plus as many series as fit.
    let column_width: u16 = 14;
    let visible_columns =
        ((area.width.saturating_sub(20)) / column_width).max(1) as usize;
    let names: Vec<&String> = table
        .series
        .keys()
        .skip(app.logs_col_offset)
        .take(visible_columns)
        .collect();

    let header = Row::new(
        std::iter::once(Cell::from(Span::styled(
            "Timestamp",
            Style::default()
                .fg(Color::Rgb(255, 215, 0))
                .add_modifier(Modifier::BOLD),
        )))
        .chain(names.iter().map(|name| {
            Cell::from(Span::styled(
                name.as_str(),
                Style::default()
                    .fg(Color::Rgb(100, 200, 255))
                    .add_modifier(Modifier::BOLD),
            ))
        }))
        .collect::<Vec<_>>(),
    )
    .height(1);

    let rows: Vec<Row> = table
        .timestamps
        .iter()
        .enumerate()
        .map(|(row_idx, timestamp)| {
            Row::new(
                std::iter::once(Cell::from(Span::styled(
                    timestamp.clone(),
                    Style::default().fg(Color::Rgb(200, 200, 220)),
                )))
                .chain(names.iter().map(|name| {
                    let value = table.series[name.as_str()][row_idx];
                    let style = match value {
                        Some(_) => Style::default().fg(Color::Rgb(255, 255, 255)),
                        None => Style::default().fg(Color::Rgb(128, 128, 150)),
                    };
                    Cell::from(Span::styled(format_cell(value), style))
                }))
                .collect::<Vec<_>>(),
            )
            .height(1)
        })
        .collect();

    let mut constraints = vec![Constraint::Length(18)];
    constraints.extend(std::iter::repeat_n(
        Constraint::Length(column_width),
        names.len(),
    ));

    f.render_widget(Table::new(rows, constraints).header(header).block(block), area);
}
