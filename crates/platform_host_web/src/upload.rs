//! Reads user-picked or dropped files into memory for upload.

use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use platform_host::UploadFile;
use wasm_bindgen::{closure::Closure, JsCast};

type ReadResult = Result<Vec<u8>, String>;
type ProgressHandler = Closure<dyn FnMut(web_sys::ProgressEvent)>;

/// Reads every file in `files` into an [`UploadFile`].
///
/// Files that fail to read are skipped and reported in the returned error list so the caller
/// can still upload the rest.
pub async fn read_file_list(files: &web_sys::FileList) -> (Vec<UploadFile>, Vec<String>) {
    let mut read = Vec::new();
    let mut failed = Vec::new();
    for index in 0..files.length() {
        let Some(file) = files.get(index) else {
            continue;
        };
        match read_file_bytes(&file).await {
            Ok(bytes) => read.push(UploadFile {
                name: file.name(),
                bytes,
            }),
            Err(err) => failed.push(format!("{}: {err}", file.name())),
        }
    }
    (read, failed)
}

/// Sender shared by the load and error handlers; whichever fires first settles the read.
struct SettleOnce<T> {
    sender: Rc<RefCell<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for SettleOnce<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Rc::clone(&self.sender),
        }
    }
}

impl<T> SettleOnce<T> {
    fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Rc::new(RefCell::new(Some(tx))),
            },
            rx,
        )
    }

    /// Delivers `value` unless the read already settled. Returns whether it was delivered.
    fn settle(&self, value: T) -> bool {
        match self.sender.borrow_mut().take() {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }
}

/// Keeps the reader callbacks alive for one read and detaches them when dropped.
struct ReaderHandlers {
    reader: web_sys::FileReader,
    _on_load: ProgressHandler,
    _on_error: ProgressHandler,
}

impl ReaderHandlers {
    fn attach(reader: &web_sys::FileReader, settle: SettleOnce<ReadResult>) -> Self {
        let reader_for_load = reader.clone();
        let load_settle = settle.clone();
        let on_load = ProgressHandler::wrap(Box::new(move |_| {
            let result = reader_for_load
                .result()
                .map(|buffer| js_sys::Uint8Array::new(&buffer).to_vec())
                .map_err(|err| format!("failed to read file: {err:?}"));
            load_settle.settle(result);
        }));
        reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let on_error = ProgressHandler::wrap(Box::new(move |_| {
            settle.settle(Err("failed to load file".to_string()));
        }));
        reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Self {
            reader: reader.clone(),
            _on_load: on_load,
            _on_error: on_error,
        }
    }
}

impl Drop for ReaderHandlers {
    fn drop(&mut self) {
        self.reader.set_onload(None);
        self.reader.set_onerror(None);
    }
}

async fn read_file_bytes(file: &web_sys::File) -> ReadResult {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (settle, rx) = SettleOnce::channel();
    let handlers = ReaderHandlers::attach(&reader, settle);

    reader
        .read_as_array_buffer(file)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "file read was interrupted".to_string());
    drop(handlers);
    result?
}
