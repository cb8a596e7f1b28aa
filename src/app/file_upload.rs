use std::sync::mpsc::Sender;

#[cfg(not(target_arch = "wasm32"))]
pub fn open_upload_dialog(sender: Sender<Vec<u8>>) {
    let file = rfd::FileDialog::new()
        .add_filter("json", &["json"])
        .pick_file();
    match file {
        Some(file) => {
            tracing::trace!(?file, "received file");
            match std::fs::read(&file) {
                Ok(bytes) => {
                    tracing::trace!(bytes_read = bytes.len(), "successfully read the file");
                    send(sender, bytes)
                }
                Err(err) => tracing::warn!(?err, ?file, "failed to read file"),
            }
        }
        None => tracing::warn!("no file picked!"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn open_upload_dialog(sender: Sender<Vec<u8>>) {
    wasm_bindgen_futures::spawn_local(async move {
        let file = rfd::AsyncFileDialog::new()
            .add_filter("json", &["json"])
            .pick_file()
            .await;
        match file {
            Some(file) => {
                let bytes = file.read().await;
                tracing::trace!(bytes_read = bytes.len(), "successfully read the file");
                send(sender, bytes)
            }
            None => tracing::warn!("no file picked!"),
        }
    })
}

fn send(sender: Sender<Vec<u8>>, bytes: Vec<u8>) {
    if let Err(err) = sender.send(bytes) {
        tracing::warn!(?err, "app is gone, dropping file")
    }
}
