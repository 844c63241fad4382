use std::path::Path;
use std::sync::mpsc::{self, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use eframe::egui;
use log::{error, info, warn};

use crate::config::AnnotatorConfig;
use crate::error::{AnnotateError, Result};
use crate::font::LabelFont;
use crate::input::LineInput;
use crate::session::RoiSession;
use crate::ui::{RoiWindow, WindowHandle};
use crate::utils;

const CONFIRM_PROMPT: &str =
    "Please select ROIs and then enter Y. Otherwise another ROI will be added!";

pub fn run(config: AnnotatorConfig) -> Result<()> {
    let input_path = utils::resolve_input(&config.input_path)?;
    let image = utils::load_image(&input_path, config.max_image_size)?;
    info!(
        "loaded {} ({}x{})",
        input_path.display(),
        image.width(),
        image.height()
    );

    let font = LabelFont::load_or_builtin(&config.font_path, config.font_size)?;
    let session = RoiSession::new(image, font, config.box_style());

    let (requests, receiver) = mpsc::channel();
    let (outcomes, outcome) = mpsc::channel();
    let worker: Arc<Mutex<Option<JoinHandle<()>>>> = Arc::new(Mutex::new(None));
    let worker_slot = worker.clone();
    let output_path = config.output_path.clone();
    let (show_crosshair, from_center) = (config.show_crosshair, config.from_center);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(&config.window_title),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |cc| {
            let handle = WindowHandle::new(requests, cc.egui_ctx.clone());
            let join =
                thread::spawn(move || run_session(session, handle, &output_path, outcomes));
            if let Ok(mut slot) = worker_slot.lock() {
                *slot = Some(join);
            }
            let mut window = RoiWindow::new(receiver);
            window.show_crosshair = show_crosshair;
            window.from_center = from_center;
            Ok(Box::new(window))
        }),
    )
    .map_err(|e| AnnotateError::Window(e.to_string()))?;

    let received = outcome.try_recv();
    if received.is_ok() {
        // 结果已发出，线程只剩关闭窗口的收尾
        if let Some(join) = worker.lock().ok().and_then(|mut slot| slot.take()) {
            let _ = join.join();
        }
    }
    session_outcome(received)
}

// 没有结果说明是用户先关闭了窗口
fn session_outcome(received: std::result::Result<Result<()>, TryRecvError>) -> Result<()> {
    match received {
        Ok(result) => result,
        Err(TryRecvError::Empty) => {
            warn!("window closed before the session finished");
            Err(AnnotateError::InputUnavailable("window closed".into()))
        }
        Err(TryRecvError::Disconnected) => Err(AnnotateError::WorkerPanicked),
    }
}

fn run_session(
    mut session: RoiSession,
    handle: WindowHandle,
    output_path: &Path,
    outcomes: Sender<Result<()>>,
) {
    let mut selector = handle.clone();
    let mut display = handle.clone();
    let mut input = LineInput::stdin().with_prompt(CONFIRM_PROMPT);

    info!("session started");
    let outcome = session
        .run(&mut selector, &mut display, &mut input)
        .and_then(|()| finish(&session, &handle, output_path));

    let failed = outcome.is_err();
    if let Err(e) = &outcome {
        error!("session aborted: {e}");
    }
    let _ = outcomes.send(outcome);
    if failed {
        handle.close();
    }
}

fn finish(session: &RoiSession, handle: &WindowHandle, output_path: &Path) -> Result<()> {
    for entry in session.entries() {
        info!(
            "roi {}: {:?} center {:?}",
            entry.label.join(" "),
            entry.bbox,
            entry.centroid
        );
    }
    println!("{:?}", session.centroids_flat());

    let annotated = session.annotate()?;
    annotated.save(output_path)?;
    info!("wrote {}", output_path.display());
    handle.finish(&annotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_is_reported_as_is() {
        let received = Ok(Err(AnnotateError::InputUnavailable("end of input".into())));
        match session_outcome(received) {
            Err(AnnotateError::InputUnavailable(reason)) => assert_eq!(reason, "end of input"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn finished_session_is_success() {
        assert!(session_outcome(Ok(Ok(()))).is_ok());
    }

    #[test]
    fn window_closed_first_is_input_unavailable() {
        assert!(matches!(
            session_outcome(Err(TryRecvError::Empty)),
            Err(AnnotateError::InputUnavailable(_))
        ));
    }

    #[test]
    fn lost_worker_is_reported() {
        assert!(matches!(
            session_outcome(Err(TryRecvError::Disconnected)),
            Err(AnnotateError::WorkerPanicked)
        ));
    }

    #[test]
    fn failed_worker_sends_outcome_before_closing_window() {
        let (requests, receiver) = mpsc::channel();
        let (outcomes, outcome) = mpsc::channel();
        let handle = WindowHandle::new(requests, egui::Context::default());
        let font = LabelFont::builtin(12.0).unwrap();
        let session = RoiSession::new(
            image::RgbImage::new(10, 10),
            font,
            crate::render::BoxStyle::default(),
        );
        drop(receiver);

        run_session(session, handle, Path::new("unused.jpg"), outcomes);

        assert!(matches!(
            outcome.try_recv(),
            Ok(Err(AnnotateError::InputUnavailable(_)))
        ));
    }
}
