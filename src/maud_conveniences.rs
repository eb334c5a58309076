use base64::{Engine, prelude::BASE64_STANDARD};
use maud::{Markup, Render, html};

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn render_nav() -> Markup {
    html! {
        nav class="fixed top-0 left-0 w-full bg-gray-800 shadow-md px-6 py-3 flex flex-row space-x-4" {
            a href="/" class="font-bold hover:text-gray-300" {"Students"}
            a href="/students/add" class="hover:text-gray-300" {"Add Student"}
        }
    }
}

pub fn form_element(id: &str, label: &str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
        }
    }
}

///red inline text under a field, or an empty slot htmx can swap into later
pub fn field_error(id: &str, error: Option<&str>, out_of_band: bool) -> Markup {
    html! {
        p id=(id) hx-swap-oob=[out_of_band.then_some("true")] class="mt-2 text-sm text-red-500" {
            @if let Some(error) = error {
                span class="font-medium" {"Error! "}
                (error)
            }
        }
    }
}

pub fn form_submit_button(text: &str, disabled: bool) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" disabled[disabled] class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text)
            }
        }
    }
}

///takes the base64 with or without a `data:` prefix
pub fn avatar_mime_type(avatar: &str) -> Option<&'static str> {
    let encoded = avatar
        .split_once(";base64,")
        .map_or(avatar, |(_, encoded)| encoded)
        .trim();
    if encoded.is_empty() {
        return None;
    }

    let bytes = BASE64_STANDARD.decode(encoded).ok()?;
    infer::get(&bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.mime_type())
}

pub fn avatar_preview(avatar: &str, out_of_band: bool) -> Markup {
    let encoded = avatar
        .split_once(";base64,")
        .map_or(avatar, |(_, encoded)| encoded)
        .trim();

    html! {
        div id="avatar-preview" hx-swap-oob=[out_of_band.then_some("true")] class="mb-4" {
            @if let Some(mime) = avatar_mime_type(avatar) {
                img src={"data:" (mime) ";base64," (encoded)} alt="Avatar preview" class="h-16 w-16 rounded-full object-cover";
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //smallest valid PNG header + IHDR chunk start
    const PNG_MAGIC: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn png_avatars_are_recognised_with_or_without_prefix() {
        let encoded = BASE64_STANDARD.encode(PNG_MAGIC);
        assert_eq!(avatar_mime_type(&encoded), Some("image/png"));
        assert_eq!(
            avatar_mime_type(&format!("data:image/png;base64,{encoded}")),
            Some("image/png")
        );
    }

    #[test]
    fn junk_avatars_have_no_preview() {
        assert_eq!(avatar_mime_type(""), None);
        assert_eq!(avatar_mime_type("not base64 at all!"), None);
        assert_eq!(avatar_mime_type(&BASE64_STANDARD.encode(b"hello")), None);

        let markup = avatar_preview("nope", false).into_string();
        assert!(!markup.contains("<img"));
    }

    #[test]
    fn field_error_slot_is_present_even_when_empty() {
        let empty = field_error("error-email", None, true).into_string();
        assert!(empty.contains(r#"id="error-email""#));
        assert!(empty.contains(r#"hx-swap-oob="true""#));
        assert!(!empty.contains("Error!"));

        let filled = field_error("error-email", Some("Email invalid"), false).into_string();
        assert!(filled.contains("Email invalid"));
        assert!(!filled.contains("hx-swap-oob"));
    }
}
