//! Rendering collaborator
//!
//! The core never draws. Hosts implement [`Renderer`] and are handed an owned
//! snapshot once per frame, which may equal the previous one when no tick ran.

use crate::sim::MatchState;

pub trait Renderer {
    fn render(&mut self, snapshot: &MatchState);
}

/// Rasterizes a snapshot into a character grid
///
/// Layout mirrors the classic canvas: outer border, a center line, and a
/// gutter line in front of each paddle.
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    frame: String,
    frames_drawn: u64,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(8),
            rows: rows.max(4),
            frame: String::new(),
            frames_drawn: 0,
        }
    }

    /// Most recently rendered frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    fn col(&self, x: f32, width: f32) -> usize {
        let c = (x / width * self.cols as f32).floor();
        (c.max(0.0) as usize).min(self.cols - 1)
    }

    fn row(&self, y: f32, height: f32) -> usize {
        let r = (y / height * self.rows as f32).floor();
        (r.max(0.0) as usize).min(self.rows - 1)
    }

    fn draw(&self, s: &MatchState) -> String {
        let (w, h) = (s.playfield_width, s.playfield_height);
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        let gutters = [
            self.col(s.left_paddle.x, w),
            self.col(w / 2.0, w),
            self.col(s.right_paddle.x, w),
        ];
        for row in grid.iter_mut() {
            for &c in &gutters {
                row[c] = ':';
            }
        }

        for (paddle, col) in [(&s.left_paddle, 0), (&s.right_paddle, self.cols - 1)] {
            let top = self.row(paddle.top(), h);
            let bottom = self.row(paddle.bottom(), h);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[col] = '#';
            }
        }

        let ball = s.ball.pos;
        if ball.x >= 0.0 && ball.x <= w {
            grid[self.row(ball.y, h)][self.col(ball.x, w)] = 'o';
        }

        let border = format!("+{}+", "-".repeat(self.cols));
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 3));
        out.push_str(&format!(
            "P1 {:>3}  |  P2 {:>3}\n",
            s.score.player1, s.score.player2
        ));
        out.push_str(&border);
        out.push('\n');
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out.push('\n');
        out
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(60, 20)
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, snapshot: &MatchState) {
        self.frame = self.draw(snapshot);
        self.frames_drawn += 1;
    }
}
