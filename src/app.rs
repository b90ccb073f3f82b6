use std::rc::Rc;

use tao::{
    dpi::{LogicalPosition, LogicalSize},
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::{Icon, Window, WindowBuilder},
};
use tracing::{debug, error, info, warn};
use wry::{http::Request, Rect, WebContext, WebView, WebViewBuilder};

use crate::{
    application::{report_missing_entry, DownloadMediator, EntryDocument},
    config::{LaunchContext, ShellConfig},
    domain::AppError,
    ui::{NavAction, Navigator, RfdNotifier, RfdSavePrompt, TOOLBAR_HTML},
};

#[derive(Debug, Clone, Copy)]
pub enum UserEvent {
    Navigate(NavAction),
}

/// The main window and the views it owns.
struct Shell {
    window: Window,
    toolbar: WebView,
    content: WebView,
    toolbar_height: f64,
    // Must outlive the content view.
    _web_context: WebContext,
}

impl Shell {
    fn layout(&self) {
        let (toolbar_bounds, content_bounds) = view_bounds(&self.window, self.toolbar_height);
        if let Err(e) = self.toolbar.set_bounds(toolbar_bounds) {
            warn!("Failed to resize toolbar: {}", e);
        }
        if let Err(e) = self.content.set_bounds(content_bounds) {
            warn!("Failed to resize content view: {}", e);
        }
    }
}

/// Toolbar strip across the top, content filling the rest.
fn view_bounds(window: &Window, toolbar_height: f64) -> (Rect, Rect) {
    let size: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    let toolbar_height = toolbar_height.min(size.height);

    let toolbar = Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(size.width, toolbar_height).into(),
    };
    let content = Rect {
        position: LogicalPosition::new(0.0, toolbar_height).into(),
        size: LogicalSize::new(size.width, size.height - toolbar_height).into(),
    };
    (toolbar, content)
}

fn load_window_icon() -> Option<Icon> {
    let icon_data = include_bytes!("../assets/icon.png");

    match image::load_from_memory(icon_data) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            Icon::from_rgba(rgba.into_raw(), width, height).ok()
        }
        Err(e) => {
            warn!("Failed to decode window icon: {}", e);
            None
        }
    }
}

/// Build the window and run the event loop until it closes.
pub fn run(launch: LaunchContext, config: ShellConfig) -> Result<(), AppError> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_position(LogicalPosition::new(config.position.0, config.position.1))
        .with_inner_size(LogicalSize::new(config.size.0, config.size.1))
        .with_window_icon(load_window_icon())
        .build(&event_loop)
        .map_err(|e| AppError::Window(e.to_string()))?;

    // A missing editor is reported but the window still opens.
    let document = EntryDocument::locate(&launch);
    report_missing_entry(&document, &RfdNotifier);

    let (toolbar_bounds, content_bounds) = view_bounds(&window, config.toolbar_height);

    let toolbar = WebViewBuilder::new()
        .with_html(TOOLBAR_HTML)
        .with_bounds(toolbar_bounds)
        .with_ipc_handler(move |message: Request<String>| {
            let body = message.body();
            match NavAction::parse(body) {
                Ok(action) => {
                    if proxy.send_event(UserEvent::Navigate(action)).is_err() {
                        debug!("Event loop closed, dropping {:?}", action);
                    }
                }
                Err(e) => warn!("Ignoring toolbar message {:?}: {}", body, e),
            }
        })
        .build_as_child(&window)
        .map_err(|e| AppError::WebView(e.to_string()))?;

    let mediator = Rc::new(DownloadMediator::new(RfdSavePrompt, RfdNotifier));
    let on_started = Rc::clone(&mediator);
    let on_completed = Rc::clone(&mediator);

    if let Some(dir) = &config.data_dir {
        info!(path = %dir.display(), "Using persistent web profile");
    }
    let mut web_context = WebContext::new(config.data_dir.clone());

    let content = WebViewBuilder::new_with_web_context(&mut web_context)
        .with_url(document.url())
        .with_bounds(content_bounds)
        .with_devtools(cfg!(debug_assertions))
        .with_download_started_handler(move |url, destination| {
            on_started.on_download_started(&url, destination)
        })
        .with_download_completed_handler(move |url, path, success| {
            on_completed.on_download_completed(&url, path, success)
        })
        .build_as_child(&window)
        .map_err(|e| AppError::WebView(e.to_string()))?;

    let shell = Shell {
        window,
        toolbar,
        content,
        toolbar_height: config.toolbar_height,
        _web_context: web_context,
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                info!(title = %shell.window.title(), "Window shown");
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => shell.layout(),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Window close requested, shutting down...");
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(UserEvent::Navigate(action)) => {
                debug!("Toolbar action: {:?}", action);
                if let Err(e) = shell.content.navigate(action) {
                    error!("Navigation failed: {}", e);
                }
            }
            _ => {}
        }
    })
}
