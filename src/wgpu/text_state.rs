use wgpu_text::glyph_brush::{HorizontalAlign, Layout, OwnedSection, OwnedText, VerticalAlign};

use crate::animator::PhaseLabel;
use crate::config::HeartConfig;

/// The phase label in the bottom-left corner
#[derive(Clone, Debug)]
pub struct TextState {
    width: f32,
    height: f32,
    font_size: f32,
    color: [f32; 4],
    offset: [f32; 2],
    text: String,
    section: OwnedSection,
}

impl TextState {
    pub fn new(config: &HeartConfig, width: u32, height: u32) -> Self {
        let mut fresh = Self {
            width: width as f32,
            height: height as f32,
            font_size: config.label_font_size,
            color: config.label_color,
            offset: config.label_offset,
            text: String::new(),
            section: OwnedSection::default(),
        };
        fresh.update_section();
        fresh
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.update_section();
    }

    pub fn section(&self) -> &OwnedSection {
        &self.section
    }

    /// Screen position of the label's bottom-left corner, origin at the top-left
    pub fn position(&self) -> [f32; 2] {
        let [x, y] = self.offset;
        [x, self.height - y]
    }

    fn update_section(&mut self) {
        let section = OwnedSection::default()
            .with_layout(
                Layout::default()
                    .v_align(VerticalAlign::Bottom)
                    .h_align(HorizontalAlign::Left),
            )
            .with_bounds([self.width, self.height])
            .with_screen_position(self.position());
        self.section = if self.text.is_empty() {
            section
        } else {
            section.add_text(
                OwnedText::new(self.text.clone())
                    .with_color(self.color)
                    .with_scale(self.font_size),
            )
        };
    }
}

impl PhaseLabel for TextState {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.update_section();
        }
    }
}
