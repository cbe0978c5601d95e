//! Dependency wiring
//! 依赖装配
//!
//! Builds the adapters and hands them to the controller. Nothing here runs
//! the view; see [`super::run`].

use std::sync::Arc;

use cv_app::{HistoryController, RenderPipeline};
use cv_core::ViewConfig;
use cv_infra::PngPreviewer;
use cv_platform::StdioBridge;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinHandle;
use tracing::debug;

/// Everything the run loop needs, fully assembled.
/// 运行所需的全部组件
pub struct ViewRuntime {
    pub controller: HistoryController,
    pub bridge: Arc<StdioBridge>,
    /// Finishes after the last bridge handle is dropped and every line is flushed.
    pub writer: JoinHandle<anyhow::Result<()>>,
}

/// Wire the view to a JSON-lines host on `reader` / `writer`
/// 将视图连接到 JSON 行协议的宿主
///
/// Must be called from inside a tokio runtime; the bridge spawns its tasks here.
pub fn wire_stdio<R, W>(config: &ViewConfig, reader: R, writer: W) -> ViewRuntime
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // Step 1: Platform bridge (gateway + host surface)
    // 步骤 1：平台桥接（网关 + 宿主界面）
    let (bridge, writer) = StdioBridge::spawn(reader, writer, config.history.path.clone());

    // Step 2: Infrastructure (image previews)
    // 步骤 2：基础设施（图片预览）
    let previewer = Arc::new(PngPreviewer::new(config.render.image_max_width));

    // Step 3: Use cases
    // 步骤 3：用例
    let pipeline = RenderPipeline::new(previewer, config.render.clone());
    let controller = HistoryController::new(
        bridge.clone(),
        bridge.clone(),
        pipeline,
        config.history.early_events,
    );

    debug!(
        history = %config.history.path.display(),
        early_events = %config.history.early_events,
        show_timestamps = config.render.show_timestamps,
        image_max_width = config.render.image_max_width,
        "View wired"
    );

    ViewRuntime {
        controller,
        bridge,
        writer,
    }
}
