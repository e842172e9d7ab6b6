//! Object-URL and save-as adapter for downloaded payloads.

use platform_host::BlobService;

#[derive(Debug, Clone, Copy, Default)]
/// Browser blob adapter using `URL.createObjectURL` and a transient anchor element.
pub struct WebBlobService;

#[cfg(target_arch = "wasm32")]
fn make_object_url(bytes: &[u8], mime: &str) -> Result<String, String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| format!("failed to build blob: {err:?}"))?;
    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| format!("failed to create object url: {err:?}"))
}

impl BlobService for WebBlobService {
    fn save_as(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let url = make_object_url(bytes, "application/octet-stream")?;
            let document = web_sys::window()
                .and_then(|window| window.document())
                .ok_or_else(|| "document unavailable".to_string())?;
            let anchor = document
                .create_element("a")
                .map_err(|err| format!("failed to create link: {err:?}"))?
                .dyn_into::<web_sys::HtmlAnchorElement>()
                .map_err(|_| "failed to cast link".to_string())?;
            anchor.set_href(&url);
            anchor.set_download(file_name);
            if let Some(body) = document.body() {
                let _ = body.append_child(&anchor);
            }
            anchor.click();
            anchor.remove();
            let _ = web_sys::Url::revoke_object_url(&url);
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (file_name, bytes);
            Err("file saving requires wasm32".to_string())
        }
    }

    fn object_url(&self, bytes: &[u8], mime: &str) -> Result<String, String> {
        #[cfg(target_arch = "wasm32")]
        {
            make_object_url(bytes, mime)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (bytes, mime);
            Err("object urls require wasm32".to_string())
        }
    }

    fn revoke_object_url(&self, url: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = web_sys::Url::revoke_object_url(url);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
        }
    }
}
