//! Reading user-picked files into reference-image attachments.

use quickthumb::generate::{ImageAttachment, MAX_IMAGE_BYTES};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Files selected in an `<input type="file">`, in order.
pub fn selected_files(event: &leptos::ev::Event) -> Vec<web_sys::File> {
    let Some(input) = event.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let files = (0..list.length()).filter_map(|i| list.get(i)).collect();
    // Allow picking the same file again.
    input.set_value("");
    files
}

/// Read one file. Size is checked before the bytes are pulled into memory.
///
/// # Errors
///
/// Returns a user-facing message for oversized files, non-images, and read
/// failures.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub async fn read_attachment(file: web_sys::File) -> Result<ImageAttachment, String> {
    let name = file.name();
    if file.size() as usize > MAX_IMAGE_BYTES {
        return Err(format!("{name} is larger than {} MB.", MAX_IMAGE_BYTES / (1024 * 1024)));
    }
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(|e| format!("could not read {name}: {e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    ImageAttachment::new(name, file.type_(), bytes).map_err(|e| e.to_string())
}
