// ABOUTME: Static assets embedded into every generated slideshow
// ABOUTME: Holds the stylesheet and navigation script and renders their HTML tags

/// Kind of embedded asset, which decides the tag it is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Js,
}

/// A fixed text asset compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub name: &'static str,
    pub kind: AssetKind,
    pub content: &'static str,
}

impl Asset {
    /// Generate the inline HTML tag embedding this asset, labelled with its name.
    pub fn tag(&self) -> String {
        match self.kind {
            AssetKind::Css => format!("<style>\n/* {} */\n{}</style>", self.name, self.content),
            AssetKind::Js => format!("<script>\n/* {} */\n{}</script>", self.name, self.content),
        }
    }
}

/// Theme, slide transition and responsive breakpoint.
pub const STYLESHEET: Asset = Asset {
    name: "slideshow.css",
    kind: AssetKind::Css,
    content: include_str!("assets/slideshow.css"),
};

/// Slide visibility, position counter, buttons and arrow-key navigation.
pub const NAVIGATION_SCRIPT: Asset = Asset {
    name: "navigation.js",
    kind: AssetKind::Js,
    content: include_str!("assets/navigation.js"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_hides_inactive_slides() {
        assert!(STYLESHEET.content.contains(".slide.active"));
        assert!(STYLESHEET.content.contains("display: none"));
        assert!(STYLESHEET.content.contains("@media (max-width: 768px)"));
    }

    #[test]
    fn test_script_handles_arrow_keys_and_boundaries() {
        let script = NAVIGATION_SCRIPT.content;
        assert!(script.contains("ArrowLeft"));
        assert!(script.contains("ArrowRight"));
        assert!(script.contains("prevButton.disabled = currentSlide === 0"));
        assert!(script.contains("nextButton.disabled = currentSlide === totalSlides - 1"));
        assert!(script.contains("showSlide(0)"));
    }

    #[test]
    fn test_tags_wrap_content() {
        assert!(STYLESHEET.tag().starts_with("<style>\n/* slideshow.css */\n"));
        assert!(NAVIGATION_SCRIPT.tag().starts_with("<script>\n/* navigation.js */\n"));
        assert!(NAVIGATION_SCRIPT.tag().ends_with("</script>"));
    }
}
