use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;
use crate::domain::models::TextArea;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::TranscriptStore;
use crate::domain::services::TurnState;
use crate::infrastructure::backends::BackendManager;

fn suggestion_line<'a>(suggestions: &[String]) -> Line<'a> {
    let mut spans: Vec<Span> = vec![Span::styled(
        "Try: ",
        Style {
            fg: Some(Color::DarkGray),
            ..Style::default()
        },
    )];

    for (idx, suggestion) in suggestions.iter().enumerate() {
        spans.push(Span::styled(
            format!("(ALT+{}) ", idx + 1),
            Style {
                fg: Some(Color::Blue),
                ..Style::default()
            },
        ));
        spans.push(Span::from(format!("{suggestion}  ")));
    }

    return Line::from(spans);
}

async fn flush_transcript(store: &TranscriptStore, app_state: &mut AppState<'_>) {
    if !app_state.take_dirty() {
        return;
    }

    if let Err(err) = store.save(&app_state.messages).await {
        tracing::warn!(err = ?err, "failed to persist transcript");
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    store: &TranscriptStore,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Max(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .bubble_list
                .render(frame, layout[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            frame.render_widget(
                Paragraph::new(suggestion_line(&app_state.suggestions)),
                layout[1],
            );

            if app_state.turn == TurnState::AwaitingReply {
                loading.render(frame, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::CompletionResponse(text) => {
                app_state.handle_completion(text);
            }
            Event::CompletionFailed(err) => {
                app_state.handle_completion_failure(&err);
            }
            Event::UITick() => {
                app_state.on_tick();
            }
            Event::UIResize() => {}
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
            Event::KeyboardCTRLC() => {
                if app_state.turn == TurnState::Idle {
                    break;
                }
                tx.send(Action::AbortRequest())?;
                app_state.cancel_turn();
            }
            Event::KeyboardPaste(text) => {
                textarea.insert_str(&text);
            }
            Event::SuggestionPick(idx) => {
                if let Some(suggestion) = app_state.suggestions.get(idx).cloned() {
                    app_state.submit(&suggestion, &tx)?;
                }
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                if let Some(command) = SlashCommand::parse(&input_str) {
                    textarea = TextArea::default();

                    if command.is_quit() {
                        break;
                    }
                    if command.is_clear() {
                        app_state.reset();
                        if let Err(err) = store.clear().await {
                            tracing::warn!(err = ?err, "failed to clear transcript");
                        }
                        continue;
                    }
                    if command.is_help() {
                        app_state.add_message(Message::new(Author::Finbot, &help_text()));
                    }
                } else if app_state.submit(&input_str, &tx)? {
                    textarea = TextArea::default();
                }
            }
            Event::KeyboardCharInput(input) => {
                if app_state.turn == TurnState::Idle {
                    textarea.input(input);
                }
            }
        }

        flush_transcript(store, app_state).await;
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let store = TranscriptStore::default();
    let mut app_state = AppState::new(store.load().await);

    let backend = BackendManager::get(BackendName::parse(&Config::get(ConfigKey::Backend))?)?;
    if let Err(err) = backend.health_check().await {
        app_state.add_message(Message::new_with_type(
            Author::Finbot,
            MessageType::Error,
            &format!("It looks like the {} backend isn't reachable. You should double check that before we start talking.\n\nError: {err}", backend.name()),
        ));
    }

    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let loop_res = start_loop(&mut terminal, &mut app_state, &store, tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return loop_res;
}
