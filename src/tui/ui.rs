//! UI rendering for the simulator.

use super::app::SimulatorApp;
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &SimulatorApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(frame.area());

    // Left side: program listing, registers, status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_program(frame, left_chunks[0], app);
    draw_registers(frame, left_chunks[1], app);
    draw_status(frame, left_chunks[2], app);

    // Right side: output port, raw memory, help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    draw_output(frame, right_chunks[0], app);
    draw_memory(frame, right_chunks[1], app);
    draw_help(frame, right_chunks[2]);
}

/// Draw the disassembled program with PC marker and breakpoints.
fn draw_program(frame: &mut Frame, area: Rect, app: &SimulatorApp) {
    let items: Vec<ListItem> = app
        .listing()
        .iter()
        .map(|(addr, text, is_current)| {
            let prefix = if *is_current { "▶ " } else { "  " };
            let bp = if app.breakpoints.contains(addr) { "●" } else { " " };

            let style = if *is_current {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if app.breakpoints.contains(addr) {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            ListItem::new(format!("{} {}{:X}: {}", bp, prefix, addr, text)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Program ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(list, area);
}

/// Draw register state.
fn draw_registers(frame: &mut Frame, area: Rect, app: &SimulatorApp) {
    let regs = &app.cpu.regs;

    let carry_style = if regs.carry {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let state_style = if app.cpu.is_halted() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let content = vec![
        Line::from(vec![
            Span::raw("A:  "),
            Span::styled(regs.a.to_string(), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:<2}", regs.a.to_u8())),
            Span::raw("   B:  "),
            Span::styled(regs.b.to_string(), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:<2}", regs.b.to_u8())),
        ]),
        Line::from(vec![
            Span::raw("PC: "),
            Span::styled(regs.pc.to_string(), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" = {:<2}", regs.pc.to_u8())),
            Span::raw("   OUT: "),
            Span::styled(regs.out.to_string(), Style::default().fg(Color::White)),
            Span::raw(format!(" = {:<2}", regs.out.to_u8())),
        ]),
        Line::from(vec![
            Span::raw("Carry: "),
            Span::styled(if regs.carry { "1" } else { "0" }, carry_style),
            Span::raw("   State: "),
            Span::styled(format!("{:?}", app.cpu.state), state_style),
            Span::raw("   Cycles: "),
            Span::styled(app.cpu.cycles.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("Speed: "),
            Span::styled(
                format!("{} steps/s", app.speed()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Registers ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw the output port as a row of LEDs.
fn draw_output(frame: &mut Frame, area: Rect, app: &SimulatorApp) {
    let out = app.cpu.regs.out.to_u8();

    let mut leds: Vec<Span> = vec![Span::raw(" ")];
    for bit in (0..4).rev() {
        let lit = out & (1 << bit) != 0;
        leds.push(if lit {
            Span::styled(" ● ", Style::default().fg(Color::Green))
        } else {
            Span::styled(" ○ ", Style::default().fg(Color::DarkGray))
        });
    }

    let content = vec![
        Line::from(leds),
        Line::from(format!("  {} = {}", app.cpu.regs.out, out)),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Output ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(paragraph, area);
}

/// Draw the raw instruction memory.
fn draw_memory(frame: &mut Frame, area: Rect, app: &SimulatorApp) {
    let pc = app.cpu.regs.pc.to_u8();

    let items: Vec<ListItem> = app
        .cpu
        .mem
        .cells()
        .iter()
        .enumerate()
        .map(|(addr, word)| {
            let is_pc = addr as u8 == pc;
            let text = format!("{:X}: {} = {:>3}", addr, word, word.to_u8());

            let style = if is_pc {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if word.to_u8() != 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Memory ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    frame.render_widget(list, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &SimulatorApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default().title(" Status ").borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("s: Step  r/space: Run/Pause  b: Breakpoint"),
        Line::from("+/-: Speed  x: Reset  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().title(" Help ").borders(Borders::ALL));

    frame.render_widget(help, area);
}
