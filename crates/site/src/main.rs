//! Binary entrypoint for the browser-hosted Dockora file manager.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    dockora_site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Build `dockora_site_app` for wasm32 with the `csr` feature and serve it next to the Dockora backend."
    );
}
