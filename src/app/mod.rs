mod compare;
mod state;
mod ui;

use crate::error::ValidationError;
use crate::workflow::{self, validate_candidate, SelectedImage, StorageClient};
use eframe::{egui, App};
use rfd::FileDialog;
use state::{SessionState, WorkflowEvent};
use std::fs;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Sides above this get downscaled before becoming a texture.
const PREVIEW_MAX: u32 = 2048;

const RESULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Payloads coming back from worker threads, tagged with the generation of
/// the attempt that produced them.
enum BgEvent {
    Workflow(WorkflowEvent),
    PreviewPixels {
        rgba: Vec<u8>,
        width: usize,
        height: usize,
    },
    ResultPixels {
        rgba: Vec<u8>,
        width: usize,
        height: usize,
    },
    ResultFetchFailed,
}

pub struct PureVision {
    storage: StorageClient,
    state: SessionState,
    before_texture: Option<egui::TextureHandle>,
    result_texture: Option<egui::TextureHandle>,
    result_fetch_failed: bool,
    generation: u64,
    sender: std_mpsc::Sender<(u64, BgEvent)>,
    events: std_mpsc::Receiver<(u64, BgEvent)>,
}

impl PureVision {
    pub fn new(_cc: &eframe::CreationContext<'_>, storage: StorageClient) -> Self {
        info!("Initializing Pure Vision");
        let (sender, events) = std_mpsc::channel();
        Self {
            storage,
            state: SessionState::default(),
            before_texture: None,
            result_texture: None,
            result_fetch_failed: false,
            generation: 0,
            sender,
            events,
        }
    }

    pub fn reset(&mut self) {
        info!("Resetting session");
        if let Some(upload) = &self.state.upload {
            debug!("Dropping result for {}", upload.object_path);
        }
        self.generation += 1;
        self.state.apply(WorkflowEvent::Reset);
        self.before_texture = None;
        self.result_texture = None;
        self.result_fetch_failed = false;
    }

    pub fn select_image(&mut self, ctx: &egui::Context) {
        if self.state.loading() {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png"])
            .pick_file()
        else {
            return;
        };

        self.generation += 1;
        self.before_texture = None;
        self.result_texture = None;
        self.result_fetch_failed = false;

        let size = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                warn!("Could not stat {}: {}", path.display(), err);
                self.state
                    .apply(WorkflowEvent::SelectionRejected(ValidationError::Unreadable));
                return;
            }
        };

        let media_type = match validate_candidate(&path, size) {
            Ok(media_type) => media_type,
            Err(reason) => {
                info!("Rejected {}: {}", path.display(), reason);
                self.state.apply(WorkflowEvent::SelectionRejected(reason));
                return;
            }
        };

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("Could not read {}: {}", path.display(), err);
                self.state
                    .apply(WorkflowEvent::SelectionRejected(ValidationError::Unreadable));
                return;
            }
        };

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        info!("Selected {} ({} bytes)", file_name, bytes.len());

        let preview_bytes = bytes.clone();
        self.state.apply(WorkflowEvent::ImageSelected(SelectedImage {
            file_name,
            media_type,
            bytes,
        }));
        self.spawn_preview_decode(preview_bytes, ctx);
    }

    pub fn start_upscale(&mut self, ctx: &egui::Context) {
        if !self.state.can_upscale() {
            return;
        }
        let Some(image) = self.state.image.clone() else {
            return;
        };

        info!("Starting upscale of {}", image.file_name);
        self.state.apply(WorkflowEvent::UpscaleStarted);

        let storage = self.storage.clone();
        let sender = self.sender.clone();
        let generation = self.generation;
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                match storage.upload_original(&image).await {
                    Err(err) => {
                        error!("Upload failed: {}", err);
                        let _ = sender.send((
                            generation,
                            BgEvent::Workflow(WorkflowEvent::UploadFailed(err)),
                        ));
                        ctx.request_repaint();
                    }
                    Ok(upload) => {
                        info!("Uploaded to {}", upload.object_path);
                        let image_url = upload.public_url.clone();
                        let file_name = upload.file_name.clone();
                        let _ = sender.send((
                            generation,
                            BgEvent::Workflow(WorkflowEvent::UploadSucceeded(upload)),
                        ));
                        ctx.request_repaint();

                        match workflow::request_upscale(&image_url, &file_name).await {
                            Ok(result) => {
                                info!("Upscale finished: {}", result.upscaled_url);
                                let _ = sender.send((
                                    generation,
                                    BgEvent::Workflow(WorkflowEvent::UpscaleSucceeded(result)),
                                ));
                            }
                            Err(err) => {
                                error!("Upscale failed: {}", err);
                                let _ = sender.send((
                                    generation,
                                    BgEvent::Workflow(WorkflowEvent::UpscaleFailed(err)),
                                ));
                            }
                        }
                        ctx.request_repaint();
                    }
                }
            });
        });
    }

    fn spawn_preview_decode(&self, bytes: Vec<u8>, ctx: &egui::Context) {
        let sender = self.sender.clone();
        let generation = self.generation;
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            match image::load_from_memory(&bytes) {
                Ok(decoded) => {
                    let rgba = clamp_to_preview(decoded).to_rgba8();
                    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
                    let _ = sender.send((
                        generation,
                        BgEvent::PreviewPixels {
                            rgba: rgba.into_raw(),
                            width,
                            height,
                        },
                    ));
                }
                Err(err) => {
                    warn!("Preview decode failed: {}", err);
                }
            }
            ctx.request_repaint();
        });
    }

    fn spawn_result_fetch(&self, url: String, ctx: &egui::Context) {
        let sender = self.sender.clone();
        let generation = self.generation;
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            match fetch_result_image(&url) {
                Ok((rgba, width, height)) => {
                    let _ = sender.send((
                        generation,
                        BgEvent::ResultPixels {
                            rgba,
                            width,
                            height,
                        },
                    ));
                }
                Err(err) => {
                    warn!("Could not fetch processed image: {}", err);
                    let _ = sender.send((generation, BgEvent::ResultFetchFailed));
                }
            }
            ctx.request_repaint();
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        while let Ok((generation, event)) = self.events.try_recv() {
            if generation != self.generation {
                debug!("Discarding event from a superseded attempt");
                continue;
            }
            match event {
                BgEvent::Workflow(event) => {
                    if let WorkflowEvent::UpscaleSucceeded(result) = &event {
                        self.result_texture = None;
                        self.result_fetch_failed = false;
                        self.spawn_result_fetch(result.upscaled_url.clone(), ctx);
                    }
                    self.state.apply(event);
                }
                BgEvent::PreviewPixels {
                    rgba,
                    width,
                    height,
                } => {
                    let img = egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba);
                    self.before_texture = Some(ctx.load_texture(
                        format!("before_{}", self.generation),
                        img,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                BgEvent::ResultPixels {
                    rgba,
                    width,
                    height,
                } => {
                    let img = egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba);
                    self.result_texture = Some(ctx.load_texture(
                        format!("result_{}", self.generation),
                        img,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                BgEvent::ResultFetchFailed => {
                    self.result_fetch_failed = true;
                }
            }
        }
    }
}

impl App for PureVision {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

fn clamp_to_preview(img: image::DynamicImage) -> image::DynamicImage {
    if img.width() > PREVIEW_MAX || img.height() > PREVIEW_MAX {
        img.thumbnail(PREVIEW_MAX, PREVIEW_MAX)
    } else {
        img
    }
}

/// Downloads and decodes the processed image so the comparison can show it.
/// Runs on its own thread with a blocking client.
fn fetch_result_image(url: &str) -> Result<(Vec<u8>, usize, usize), String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(RESULT_FETCH_TIMEOUT)
        .build()
        .map_err(|e| format!("Failed to build client: {}", e))?;
    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("Failed to download image: {}", e))?;
    let decoded =
        image::load_from_memory(&bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let rgba = clamp_to_preview(decoded).to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    Ok((rgba.into_raw(), width, height))
}
