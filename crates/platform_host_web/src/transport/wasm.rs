use reqwasm::http::{Request, RequestCredentials, Response};
use wasm_bindgen::JsValue;

use super::*;

fn map_net(err: reqwasm::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

fn map_js(err: JsValue) -> GatewayError {
    GatewayError::Network(format!("{err:?}"))
}

async fn checked(resp: Response) -> GatewayResult<Response> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(remote_error(status, &body))
}

pub async fn get_text(url: &str) -> GatewayResult<String> {
    let resp = Request::get(url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(map_net)?;
    checked(resp)
        .await?
        .text()
        .await
        .map_err(|err| GatewayError::Decode(err.to_string()))
}

pub async fn get_bytes(url: &str) -> GatewayResult<Vec<u8>> {
    let resp = Request::get(url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(map_net)?;
    checked(resp)
        .await?
        .binary()
        .await
        .map_err(|err| GatewayError::Decode(err.to_string()))
}

pub async fn post_json(url: &str, body: String) -> GatewayResult<String> {
    let resp = Request::post(url)
        .credentials(RequestCredentials::Include)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .map_err(map_net)?;
    checked(resp)
        .await?
        .text()
        .await
        .map_err(|err| GatewayError::Decode(err.to_string()))
}

pub async fn post_file(
    url: &str,
    file: &UploadFile,
    fields: UploadFields<'_>,
) -> GatewayResult<()> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(map_js)?;

    let form = web_sys::FormData::new().map_err(map_js)?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(map_js)?;
    form.append_with_str("path", fields.destination)
        .map_err(map_js)?;
    form.append_with_str(
        "system_root_access",
        if fields.system_root_access {
            "true"
        } else {
            "false"
        },
    )
    .map_err(map_js)?;

    let resp = Request::post(url)
        .credentials(RequestCredentials::Include)
        .body(form)
        .send()
        .await
        .map_err(map_net)?;
    checked(resp).await.map(|_| ())
}
