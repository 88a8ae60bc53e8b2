use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::application::ConsultationWidget;
use crate::domain::{waiting_frame, ConsultationView, INPUT_PLACEHOLDER};

const TITLE: &str = "Mercalike AI Consultant";
const SUBTITLE: &str = "Pregunta sobre disponibilidad, clases o consejos.";
const BUTTON_LABEL: &str = " Consultar ";
const HELP: &str = "Enter: consultar · Esc: salir";

pub fn draw(frame: &mut Frame, widget: &ConsultationWidget, tick: usize) {
    let [header, result, form, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_result(frame, result, widget.view(), tick);
    draw_form(frame, form, widget);

    frame.render_widget(
        Paragraph::new(Line::from(format!("{HELP} · {}", widget.backend_name())).dark_gray()),
        footer,
    );
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(TITLE.bold().cyan()),
        Line::from(SUBTITLE.dark_gray()),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_result(frame: &mut Frame, area: Rect, view: ConsultationView<'_>, tick: usize) {
    let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));

    let paragraph = match view {
        ConsultationView::Placeholder => {
            Paragraph::new(view.text().unwrap_or_default().dark_gray())
                .alignment(Alignment::Center)
        }
        ConsultationView::Waiting => {
            Paragraph::new(waiting_frame(tick).blue()).alignment(Alignment::Center)
        }
        ConsultationView::Answer(text) => Paragraph::new(text.white()),
        ConsultationView::Failed => {
            Paragraph::new(view.text().unwrap_or_default().light_red())
                .alignment(Alignment::Center)
        }
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
}

fn draw_form(frame: &mut Frame, area: Rect, widget: &ConsultationWidget) {
    let button_width = BUTTON_LABEL.chars().count() as u16 + 2;
    let [input_area, button_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(button_width)]).areas(area);

    let query = widget.query().as_str();
    let input = if query.is_empty() {
        Paragraph::new(INPUT_PLACEHOLDER.dark_gray())
    } else {
        Paragraph::new(query)
    };
    frame.render_widget(input.block(Block::bordered()), input_area);

    let button_style = if widget.is_submit_disabled() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(BUTTON_LABEL, button_style)).block(Block::bordered()),
        button_area,
    );

    // Keep the cursor inside the input box even for long queries.
    let typed = u16::try_from(query.chars().count()).unwrap_or(u16::MAX);
    let max_x = input_area
        .x
        .saturating_add(input_area.width.saturating_sub(2));
    let x = input_area.x.saturating_add(1).saturating_add(typed).min(max_x);
    frame.set_cursor_position(Position::new(x, input_area.y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::connector::MockAdvisoryService;
    use crate::domain::{FAILURE_MESSAGE, PLACEHOLDER_PROMPT};

    fn render(widget: &ConsultationWidget) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|frame| draw(frame, widget, 0)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn idle_shows_placeholder_and_input_hint() {
        let widget = ConsultationWidget::new(Arc::new(MockAdvisoryService::new()));
        let screen = render(&widget);

        assert!(screen.contains(TITLE));
        assert!(screen.contains(PLACEHOLDER_PROMPT));
        assert!(screen.contains(INPUT_PLACEHOLDER));
        assert!(screen.contains("Consultar"));
    }

    #[tokio::test]
    async fn answered_shows_only_the_answer() {
        let mut widget = ConsultationWidget::new(Arc::new(MockAdvisoryService::new()));
        widget.ask("¿Puedo registrar 'Acme'?").await;
        let screen = render(&widget);

        assert!(!screen.contains(PLACEHOLDER_PROMPT));
        assert!(!screen.contains(FAILURE_MESSAGE));
        assert!(screen.contains("¿Puedo registrar 'Acme'?"));
    }

    #[test]
    fn very_long_query_keeps_cursor_inside_input() {
        let mut widget = ConsultationWidget::new(Arc::new(MockAdvisoryService::new()));
        widget.update_query("a".repeat(70_000));

        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|frame| draw(frame, &widget, 0)).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 100);
        assert!(!widget.is_submit_disabled());
    }

    #[tokio::test]
    async fn errored_shows_failure_message() {
        let mut widget = ConsultationWidget::new(Arc::new(MockAdvisoryService::failing()));
        widget.ask("¿Puedo registrar 'Acme'?").await;
        let screen = render(&widget);

        assert!(screen.contains("No pudimos completar tu consulta."));
        assert!(!screen.contains(PLACEHOLDER_PROMPT));
    }
}
