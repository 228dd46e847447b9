use super::style::dim;

const DEFAULT_PAGE_SIZE: usize = 7;

/// Windows a block of list lines down to one page.
///
/// In infinite mode the window rotates through the list so the active line
/// drifts towards the middle and navigation never hits an edge; in clamped
/// mode the window slides within bounds, only far enough to keep the active
/// line visible.
#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    is_infinite: bool,
    // position of the active line inside the window (infinite mode)
    pointer: usize,
    last_active: usize,
    // first visible line (clamped mode)
    scroll_top: usize,
}

impl Paginator {
    pub fn new(page_size: Option<usize>, is_infinite: bool) -> Self {
        Self {
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            is_infinite,
            pointer: 0,
            last_active: 0,
            scroll_top: 0,
        }
    }

    pub fn paginate(&mut self, content: &str, active: usize) -> String {
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() <= self.page_size {
            return content.to_string();
        }

        let window = if self.is_infinite {
            self.infinite_window(&lines, active)
        } else {
            self.clamped_window(&lines, active)
        };

        let mut out = window.join("\n");
        out.push('\n');
        out.push_str(&dim("(Move up and down to reveal more choices)"));
        out
    }

    fn infinite_window(&mut self, lines: &[&str], active: usize) -> Vec<String> {
        let middle = self.page_size / 2;
        if self.pointer < middle
            && self.last_active < active
            && active - self.last_active < self.page_size
        {
            self.pointer = middle.min(self.pointer + active - self.last_active);
        }
        self.last_active = active;

        let top = (active + lines.len() - self.pointer) % lines.len();
        (0..self.page_size)
            .map(|i| lines[(top + i) % lines.len()].to_string())
            .collect()
    }

    fn clamped_window(&mut self, lines: &[&str], active: usize) -> Vec<String> {
        if active < self.scroll_top {
            self.scroll_top = active;
        } else if active >= self.scroll_top + self.page_size {
            self.scroll_top = active + 1 - self.page_size;
        }
        self.scroll_top = self.scroll_top.min(lines.len() - self.page_size);

        lines[self.scroll_top..self.scroll_top + self.page_size]
            .iter()
            .map(|l| l.to_string())
            .collect()
    }
}
