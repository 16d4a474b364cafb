// ABOUTME: HTML rendering module for the slideshow-agent application
// ABOUTME: Assembles slide content and images into one self-contained HTML document

use crate::resources::{NAVIGATION_SCRIPT, STYLESHEET};
use crate::state::{ImageRef, SlideContent};
use log::info;
use std::collections::HashMap;

/// Page returned when there is nothing to render.
pub const ERROR_PAGE: &str = "<html><body><h1>Error: No slides to display</h1></body></html>";

const MISSING_IMAGE_URL: &str = "https://picsum.photos/800/600";
const MISSING_IMAGE_ALT: &str = "Image";

/// Escape the characters that would let text open or close a tag.
pub fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape a value placed inside a double-quoted attribute.
fn escape_attr(text: &str) -> String {
    escape_text(&text.replace('&', "&amp;").replace('"', "&quot;"))
}

/// Render the full slideshow document.
///
/// Slide 1 uses the title template, every other slide the two-column content
/// template. Slides without an entry in `images` get a generic placeholder.
pub fn render(topic: &str, slides: &[SlideContent], images: &HashMap<u32, ImageRef>) -> String {
    if slides.is_empty() {
        return ERROR_PAGE.to_string();
    }

    let topic = escape_text(topic);

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{} - Presentation</title>\n", topic));
    html_doc.push_str(&STYLESHEET.tag());
    html_doc.push_str("\n</head>\n<body>\n<div class=\"slideshow-container\">\n");

    for slide in slides {
        let (url, alt_text) = match images.get(&slide.slide_number) {
            Some(image) => (image.url.as_str(), image.alt_text.as_str()),
            None => (MISSING_IMAGE_URL, MISSING_IMAGE_ALT),
        };
        let image = format!(
            "<div class=\"slide-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>",
            escape_attr(url),
            escape_attr(alt_text)
        );

        if slide.slide_number == 1 {
            html_doc.push_str(&render_title_slide(slide, &topic, &image));
        } else {
            html_doc.push_str(&render_content_slide(slide, &image));
        }
    }

    html_doc.push_str("</div>\n");
    html_doc.push_str(&format!(
        "<div class=\"slide-counter\"><span id=\"current-slide\">1</span> / <span id=\"total-slides\">{}</span></div>\n",
        slides.len()
    ));
    html_doc.push_str("<div class=\"nav-buttons\">\n");
    html_doc.push_str("<button class=\"nav-btn\" id=\"prev-btn\">&larr; Previous</button>\n");
    html_doc.push_str("<button class=\"nav-btn\" id=\"next-btn\">Next &rarr;</button>\n");
    html_doc.push_str("</div>\n");
    html_doc.push_str(&NAVIGATION_SCRIPT.tag());
    html_doc.push_str("\n</body>\n</html>");

    info!("Generated HTML: {} characters", html_doc.len());
    html_doc
}

fn slide_title(slide: &SlideContent) -> String {
    if slide.title.trim().is_empty() {
        format!("Slide {}", slide.slide_number)
    } else {
        escape_text(&slide.title)
    }
}

fn render_title_slide(slide: &SlideContent, topic: &str, image: &str) -> String {
    format!(
        "<div class=\"slide title-slide\" data-slide=\"{number}\">\n\
         <div class=\"slide-content\">\n\
         <h1>{title}</h1>\n\
         <div class=\"subtitle\">{topic}</div>\n\
         {image}\n\
         </div>\n\
         </div>\n",
        number = slide.slide_number,
        title = slide_title(slide),
        topic = topic,
        image = image,
    )
}

fn render_content_slide(slide: &SlideContent, image: &str) -> String {
    let bullet_points = if slide.bullet_points.is_empty() {
        String::new()
    } else {
        let items: String = slide
            .bullet_points
            .iter()
            .map(|point| format!("<li>{}</li>", escape_text(point)))
            .collect();
        format!("<ul>{}</ul>\n", items)
    };

    let supporting_info = if slide.supporting_info.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"supporting-info\"><p>{}</p></div>\n",
            escape_text(&slide.supporting_info)
        )
    };

    format!(
        "<div class=\"slide\" data-slide=\"{number}\">\n\
         <div class=\"slide-header\"><h2>{title}</h2></div>\n\
         <div class=\"slide-body\">\n\
         <div class=\"slide-content\">\n\
         <div class=\"content-text\">\n\
         <p>{content}</p>\n\
         {bullet_points}{supporting_info}\
         </div>\n\
         </div>\n\
         {image}\n\
         </div>\n\
         </div>\n",
        number = slide.slide_number,
        title = slide_title(slide),
        content = escape_text(&slide.content),
        bullet_points = bullet_points,
        supporting_info = supporting_info,
        image = image,
    )
}
