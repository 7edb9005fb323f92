use crate::TITLE_ANIM_LAST;

/// Cursor for the scanning highlight. Sweeps the title once, then rests
/// until it passes `TITLE_ANIM_LAST` and wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleAnimator {
    anim_index: u32,
}

impl TitleAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.anim_index += 1;
        if self.anim_index > TITLE_ANIM_LAST {
            self.anim_index = 0;
        }
    }

    pub fn render<'a>(&self, title: &'a str) -> Vec<TitleSpan<'a>> {
        render_title(title, self.anim_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleSpan<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

impl<'a> TitleSpan<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }
}

/// Split `title` around the char at `anim_index`. Empty spans are left out;
/// an index past the end yields the whole title plain.
pub fn render_title(title: &str, anim_index: u32) -> Vec<TitleSpan<'_>> {
    let Some((start, ch)) = title.char_indices().nth(anim_index as usize) else {
        if title.is_empty() {
            return Vec::new();
        }
        return vec![TitleSpan::plain(title)];
    };
    let end = start + ch.len_utf8();

    let mut spans = Vec::with_capacity(3);
    if start > 0 {
        spans.push(TitleSpan::plain(&title[..start]));
    }
    spans.push(TitleSpan {
        text: &title[start..end],
        highlighted: true,
    });
    if end < title.len() {
        spans.push(TitleSpan::plain(&title[end..]));
    }
    spans
}
