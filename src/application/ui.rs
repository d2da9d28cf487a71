use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::KeyboardEnhancementFlags;
use crossterm::event::PopKeyboardEnhancementFlags;
use crossterm::event::PushKeyboardEnhancementFlags;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::supports_keyboard_enhancement;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::SlashCommand;
use crate::domain::models::TextArea;
use crate::domain::models::QUICK_PROMPTS;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ScopeSelector;
use crate::domain::services::ASSISTANT_TITLE;

fn render_header<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {ASSISTANT_TITLE} "),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("│ {} ", app_state.scope_selector.current().label())),
        Span::styled("│ ● Live data", Style::default().fg(Color::Green)),
    ]);

    frame.render_widget(Paragraph::new(line), rect);
}

fn render_quick_prompts<B: Backend>(frame: &mut Frame<B>, rect: Rect) {
    let lines = QUICK_PROMPTS
        .iter()
        .enumerate()
        .map(|(idx, prompt)| {
            return Line::from(vec![
                Span::styled(
                    format!("F{} ", idx + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(prompt.to_string()),
            ]);
        })
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Suggested questions"),
        ),
        rect,
    );
}

fn render_notice<B: Backend>(frame: &mut Frame<B>, rect: Rect, notice: &str) {
    frame.render_widget(
        Paragraph::new(notice.to_string())
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
        rect,
    );
}

fn notice_height(notice: &Option<String>, screen: Rect) -> u16 {
    let notice = match notice {
        Some(notice) => notice,
        None => return 0,
    };

    let lines = u16::try_from(notice.lines().count()).unwrap_or(u16::MAX);
    return lines.saturating_add(2).min(screen.height / 2);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    #[cfg(feature = "dev")]
    {
        textarea.insert_str(QUICK_PROMPTS[0]);
    }

    loop {
        terminal.draw(|frame| {
            let mut quick_prompts_height = 0;
            if app_state.quick_prompts_visible() {
                quick_prompts_height = QUICK_PROMPTS.len() as u16 + 2;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(quick_prompts_height),
                    Constraint::Length(notice_height(&app_state.notice, frame.size())),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            render_header(frame, layout[0], app_state);
            app_state
                .bubble_list
                .render(frame, layout[1], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[1].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if quick_prompts_height > 0 {
                render_quick_prompts(frame, layout[2]);
            }

            if let Some(notice) = &app_state.notice {
                render_notice(frame, layout[3], notice);
            }

            if app_state.is_busy() {
                loading.render(frame, layout[4]);
            } else {
                frame.render_widget(textarea.widget(), layout[4]);
            }
        })?;

        match events.next().await? {
            Event::BackendReply(outcome) => {
                app_state.handle_backend_reply(outcome);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");

                if let Some(command) = SlashCommand::parse(&input_str) {
                    if command.is_quit() {
                        break;
                    }

                    textarea = TextArea::default();
                    app_state.handle_slash_command(&command);
                    continue;
                }

                if let Some(turn_request) = app_state.submit(&input_str) {
                    textarea = TextArea::default();
                    tx.send(Action::BackendRequest(turn_request))?;
                }
            }
            Event::KeyboardNewline() => {
                if !app_state.is_busy() {
                    textarea.insert_newline();
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.is_busy() {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.is_busy() {
                    textarea.insert_str(text);
                }
            }
            Event::QuickPrompt(idx) => {
                if let Some(turn_request) = app_state.submit_quick_prompt(idx) {
                    tx.send(Action::BackendRequest(turn_request))?;
                }
            }
            Event::ScopeNext() => {
                app_state.next_scope();
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        PopKeyboardEnhancementFlags,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(ScopeSelector::from_config()?);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Shift+Enter is indistinguishable from Enter without this.
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        crossterm::execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    } else {
        tracing::warn!("Terminal lacks keyboard enhancement, Shift+Enter acts as Enter");
    }

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    if keyboard_enhanced {
        crossterm::execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
