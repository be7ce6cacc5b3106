//! Plain-text terminal renderer.
//!
//! Keeps one character canvas per layer and, on present, prints the
//! topmost glyph of each cell inside the camera's view, the status column,
//! and the most recent log lines.

use hourglass_core::ecs::Layer;
use hourglass_core::math::GridBounds;
use hourglass_services::Settings;
use hourglass_sim::{FrameInfo, Renderer, StatusLine};
use std::collections::VecDeque;
use std::io::Write;

const LOG_LINES: usize = 8;
const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

pub struct TextRenderer<W: Write> {
    out: W,
    map: GridBounds,
    view: GridBounds,
    layers: Vec<Vec<Option<char>>>,
    log: VecDeque<String>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, settings: &Settings) -> Self {
        let map = GridBounds::new(settings.map.width, settings.map.height);
        let cells = (map.width.max(0) * map.height.max(0)) as usize;
        Self {
            out,
            map,
            view: GridBounds::new(settings.screen.width, settings.screen.height),
            layers: vec![vec![None; cells]; Layer::COUNT],
            log: VecDeque::with_capacity(LOG_LINES),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.map
            .contains(x, y)
            .then(|| (y * self.map.width + x) as usize)
    }

    /// Topmost glyph at a map cell.
    fn glyph_at(&self, x: i32, y: i32) -> char {
        let Some(i) = self.index(x, y) else {
            return ' ';
        };
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer[i])
            .unwrap_or(' ')
    }

    fn compose(&self, frame: &FrameInfo) -> String {
        let status = status_lines(&frame.status, frame.turn);
        let left = frame.camera.x - self.view.width / 2;
        let top = frame.camera.y - self.view.height / 2;

        // Status lines past the bottom of the view sit under a blank map row.
        let rows = (self.view.height.max(0) as usize).max(status.len());
        let blank = " ".repeat(self.view.width.max(0) as usize);

        let mut screen = String::new();
        for row in 0..rows {
            if (row as i32) < self.view.height {
                let line: String = (0..self.view.width)
                    .map(|col| self.glyph_at(left + col, top + row as i32))
                    .collect();
                screen.push_str(&line);
            } else {
                screen.push_str(&blank);
            }
            if let Some(stat) = status.get(row) {
                screen.push_str("  ");
                screen.push_str(stat);
            }
            screen.push('\n');
        }
        screen.push('\n');
        for line in &self.log {
            screen.push_str(line);
            screen.push('\n');
        }
        screen
    }
}

fn stat(label: &str, value: Option<i32>) -> String {
    match value {
        Some(value) => format!("{label}: {value}"),
        None => format!("{label}: -"),
    }
}

fn status_lines(status: &StatusLine, turn: u64) -> Vec<String> {
    vec![
        stat("HP", status.health),
        stat("ATK", status.attack),
        stat("DEF", status.defense),
        stat("TIME", status.time),
        String::new(),
        stat("DEPTH", status.depth),
        format!("TURN: {turn}"),
    ]
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.fill(None);
        }
    }

    fn erase(&mut self, layer: Layer, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.layers[layer.index()][i] = None;
        }
    }

    fn draw(&mut self, layer: Layer, x: i32, y: i32, glyph: char) {
        if let Some(i) = self.index(x, y) {
            self.layers[layer.index()][i] = Some(glyph);
        }
    }

    fn log(&mut self, line: &str) {
        for part in line.lines() {
            if self.log.len() == LOG_LINES {
                self.log.pop_front();
            }
            self.log.push_back(part.to_string());
        }
    }

    fn present(&mut self, frame: &FrameInfo) -> std::io::Result<()> {
        let screen = self.compose(frame);
        self.out.write_all(CLEAR_AND_HOME.as_bytes())?;
        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }
}
