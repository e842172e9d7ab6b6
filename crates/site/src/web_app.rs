use dockora_app_file_manager::FileManagerApp;
use file_manager_runtime::{FileManagerConfig, FileManagerProvider};
use leptos::*;
use leptos_meta::*;
use platform_host_web::{
    build_host_services, resolve_api_base_url, resolve_share_base_url, PageOrigin,
};

/// Fills empty backend URLs in `config` from the page origin.
pub fn resolve_runtime_config(mut config: FileManagerConfig, origin: &PageOrigin) -> FileManagerConfig {
    config.api_base_url = resolve_api_base_url(&config.api_base_url, origin);
    config.share_base_url = resolve_share_base_url(&config.share_base_url, origin);
    config
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let config = resolve_runtime_config(FileManagerConfig::bundled(), &PageOrigin::current());
    let host_services = build_host_services(&config.api_base_url);

    view! {
        <Title text="Dockora Files" />
        <Meta name="description" content="Browse, share and manage files on your Dockora server." />

        <main class="site-root">
            <FileManagerProvider host_services=host_services config=config>
                <FileManagerApp />
            </FileManagerProvider>
        </main>
    }
}
