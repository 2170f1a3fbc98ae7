//! Main application component for the robowrap GUI

use super::messages::{BrowseTarget, Message};
use crate::error::Result;
use crate::launcher::LaunchMode;
use crate::request::{parse_throughput, path_from_text, CopyRequest, InterPacketGap, ThreadCount};
use crate::session::{Session, Tone};
use winio::prelude::*;

/// Main application component
///
/// Every button click snapshots the widgets into a fresh [`CopyRequest`];
/// the only state kept between clicks is the [`Session`].
pub struct RobowrapApp {
    window: Child<Window>,

    status_label: Child<Label>,

    source_label: Child<Label>,
    source_edit: Child<Edit>,
    source_browse: Child<Button>,
    source_file_browse: Child<Button>,

    dest_label: Child<Label>,
    dest_edit: Child<Edit>,
    dest_browse: Child<Button>,

    move_check: Child<CheckBox>,
    mirror_check: Child<CheckBox>,
    timestamps_check: Child<CheckBox>,
    restartable_check: Child<CheckBox>,
    huge_files_check: Child<CheckBox>,

    threads_label: Child<Label>,
    threads_combo: Child<ComboBox>,
    ipg_label: Child<Label>,
    ipg_combo: Child<ComboBox>,
    mbps_label: Child<Label>,
    mbps_edit: Child<Edit>,

    generate_button: Child<Button>,
    execute_button: Child<Button>,

    command_label: Child<Label>,
    command_box: Child<TextBox>,

    session: Session,
}

impl RobowrapApp {
    /// Capture the current widget state
    fn snapshot(&self) -> Result<CopyRequest> {
        let threads = self
            .threads_combo
            .selection()
            .and_then(|i| ThreadCount::CHOICES.get(i).copied())
            .map_or(Ok(ThreadCount::DISABLED), ThreadCount::new)?;
        let inter_packet_gap = self
            .ipg_combo
            .selection()
            .and_then(|i| InterPacketGap::presets().get(i).map(|(gap, _)| *gap))
            .unwrap_or(InterPacketGap::NONE);

        Ok(CopyRequest {
            source: path_from_text(&self.source_edit.text()),
            destination: path_from_text(&self.dest_edit.text()),
            move_files: self.move_check.is_checked(),
            mirror: self.mirror_check.is_checked(),
            keep_timestamps: self.timestamps_check.is_checked(),
            threads,
            throughput_mb: parse_throughput(&self.mbps_edit.text())?,
            inter_packet_gap,
            restartable: self.restartable_check.is_checked(),
            huge_files: self.huge_files_check.is_checked(),
        })
    }

    fn show_status(&mut self) {
        self.status_label.set_text(self.session.status_line());
        self.command_box.set_text(self.session.command_text());
        let idle = self.session.can_execute();
        self.generate_button.set_enabled(idle);
        self.execute_button.set_enabled(idle);
    }

    fn show_option_error(&mut self, reason: impl std::fmt::Display) {
        self.status_label
            .set_text(format!("{} {reason}", Tone::Bad.marker()));
    }

    fn generate(&mut self) {
        match self.snapshot() {
            Ok(request) => {
                // Failure lands in the session status
                let _ = self.session.generate(&request);
                self.show_status();
            }
            Err(e) => self.show_option_error(e),
        }
    }

    fn execute(&mut self, sender: &ComponentSender<Self>) {
        let request = match self.snapshot() {
            Ok(request) => request,
            Err(e) => {
                self.show_option_error(e);
                return;
            }
        };

        match self.session.execute(&request, LaunchMode::Direct) {
            Ok(handle) => {
                let sender = sender.clone();
                compio::runtime::spawn(async move {
                    sender.post(Message::RunFinished(handle.wait().await));
                })
                .detach();
            }
            // Refusals and launch failures land in the session status
            Err(e) => tracing::debug!("Execute refused: {}", e),
        }
        self.show_status();
    }

    async fn browse(&mut self, target: BrowseTarget) {
        let dialog = FileBox::new().title(target.title());
        let picked = if target.picks_file() {
            dialog.open(&self.window).await
        } else {
            dialog.open_folder(&self.window).await
        };
        let Some(path) = picked else {
            return;
        };
        let edit = if target.fills_source() {
            &mut self.source_edit
        } else {
            &mut self.dest_edit
        };
        edit.set_text(path.to_string_lossy());
    }
}

impl Component for RobowrapApp {
    type Event = (); // Root component outputs () to stop the application
    type Init<'a> = ();
    type Message = Message;

    fn init(_init: Self::Init<'_>, _sender: &ComponentSender<Self>) -> Self {
        init! {
            window: Window = (()) => {
                text: format!("robowrap v{}", env!("CARGO_PKG_VERSION")),
                size: Size::new(800.0, 560.0),
            },
            status_label: Label = (&window) => {
                text: "Waiting for work",
            },
            source_label: Label = (&window) => { text: "Source (file or directory)" },
            source_edit: Edit = (&window),
            source_browse: Button = (&window) => { text: "Folder..." },
            source_file_browse: Button = (&window) => { text: "File..." },
            dest_label: Label = (&window) => { text: "Destination directory" },
            dest_edit: Edit = (&window),
            dest_browse: Button = (&window) => { text: "Browse..." },
            move_check: CheckBox = (&window) => { text: "Move" },
            mirror_check: CheckBox = (&window) => { text: "Mirror" },
            timestamps_check: CheckBox = (&window) => { text: "Keep timestamps", checked: true },
            restartable_check: CheckBox = (&window) => { text: "Restartable" },
            huge_files_check: CheckBox = (&window) => { text: "Huge files (unbuffered /J)" },
            threads_label: Label = (&window) => { text: "Threads" },
            threads_combo: ComboBox = (&window),
            ipg_label: Label = (&window) => { text: "Inter-packet gap (speed limiter)" },
            ipg_combo: ComboBox = (&window),
            mbps_label: Label = (&window) => { text: "Max MB/s (empty = unlimited)" },
            mbps_edit: Edit = (&window),
            generate_button: Button = (&window) => { text: "Generate CLI code" },
            execute_button: Button = (&window) => { text: "Generate CLI code and Execute" },
            command_label: Label = (&window) => { text: "CLI args" },
            command_box: TextBox = (&window),
        }

        for (i, n) in ThreadCount::CHOICES.iter().enumerate() {
            let label = if *n == 0 { "off".to_string() } else { n.to_string() };
            threads_combo.insert(i, label);
        }
        threads_combo.set_selection(Some(0));

        for (i, (_, label)) in InterPacketGap::presets().iter().enumerate() {
            ipg_combo.insert(i, *label);
        }
        ipg_combo.set_selection(Some(0));

        // Center window on screen
        let monitors = Monitor::all();
        if !monitors.is_empty() {
            let region = monitors[0].client_scaled();
            let window_size = window.size();
            let center = region.origin + region.size / 2.0 - window_size / 2.0;
            window.set_loc(center);
        }

        window.show();

        Self {
            window,
            status_label,
            source_label,
            source_edit,
            source_browse,
            source_file_browse,
            dest_label,
            dest_edit,
            dest_browse,
            move_check,
            mirror_check,
            timestamps_check,
            restartable_check,
            huge_files_check,
            threads_label,
            threads_combo,
            ipg_label,
            ipg_combo,
            mbps_label,
            mbps_edit,
            generate_button,
            execute_button,
            command_label,
            command_box,
            session: Session::default(),
        }
    }

    async fn start(&mut self, sender: &ComponentSender<Self>) -> ! {
        start! {
            sender, default: Message::Noop,
            self.window => {
                WindowEvent::Close => Message::WindowClose,
                WindowEvent::Resize => Message::Resize,
            },
            self.source_browse => {
                ButtonEvent::Click => Message::Browse(BrowseTarget::SourceFolder),
            },
            self.source_file_browse => {
                ButtonEvent::Click => Message::Browse(BrowseTarget::SourceFile),
            },
            self.dest_browse => {
                ButtonEvent::Click => Message::Browse(BrowseTarget::Destination),
            },
            self.generate_button => {
                ButtonEvent::Click => Message::Generate,
            },
            self.execute_button => {
                ButtonEvent::Click => Message::Execute,
            }
        }
    }

    async fn update_children(&mut self) -> bool {
        let (window, source, dest, mbps, command) = futures::join!(
            self.window.update(),
            self.source_edit.update(),
            self.dest_edit.update(),
            self.mbps_edit.update(),
            self.command_box.update(),
        );
        window | source | dest | mbps | command
    }

    async fn update(&mut self, message: Self::Message, sender: &ComponentSender<Self>) -> bool {
        match message {
            Message::Noop => false,

            Message::Resize => true,

            Message::WindowClose => {
                if self.session.can_execute() {
                    sender.output(());
                    return false;
                }
                // robocopy keeps running after the window closes
                match MessageBox::new()
                    .title("Close robowrap?")
                    .message("robocopy is still running.")
                    .instruction("It will keep running in its own process.")
                    .style(MessageBoxStyle::Question)
                    .buttons(MessageBoxButton::Yes | MessageBoxButton::No)
                    .show(&self.window)
                    .await
                {
                    MessageBoxResponse::Yes => {
                        sender.output(());
                        false
                    }
                    _ => false,
                }
            }

            Message::Browse(target) => {
                self.browse(target).await;
                false
            }

            Message::Generate => {
                self.generate();
                true
            }

            Message::Execute => {
                self.execute(sender);
                true
            }

            Message::RunFinished(outcome) => {
                self.session.finish(outcome);
                self.show_status();
                true
            }
        }
    }

    fn render(&mut self, _sender: &ComponentSender<Self>) {
        let csize = self.window.client_size();
        let m = Margin::new_all_same(4.0);

        let Ok(grid) = Grid::from_str(
            "auto,1*,auto,auto",
            "auto,auto,auto,auto,auto,auto,auto,auto,auto,auto,1*",
        ) else {
            tracing::warn!("Invalid grid layout");
            return;
        };

        let mut panel = layout! {
            grid,
            self.status_label => { column: 0, row: 0, column_span: 4, margin: m },
            self.source_label => { column: 0, row: 1, margin: m, valign: VAlign::Center },
            self.source_edit => { column: 1, row: 1, margin: m },
            self.source_browse => { column: 2, row: 1, margin: m },
            self.source_file_browse => { column: 3, row: 1, margin: m },
            self.dest_label => { column: 0, row: 2, margin: m, valign: VAlign::Center },
            self.dest_edit => { column: 1, row: 2, margin: m },
            self.dest_browse => { column: 2, row: 2, margin: m },
            self.move_check => { column: 0, row: 3, margin: m },
            self.mirror_check => { column: 1, row: 3, margin: m },
            self.timestamps_check => { column: 2, row: 3, margin: m },
            self.restartable_check => { column: 0, row: 4, margin: m },
            self.huge_files_check => { column: 1, row: 4, margin: m },
            self.threads_label => { column: 0, row: 5, margin: m, valign: VAlign::Center },
            self.threads_combo => { column: 1, row: 5, margin: m },
            self.ipg_label => { column: 0, row: 6, margin: m, valign: VAlign::Center },
            self.ipg_combo => { column: 1, row: 6, margin: m },
            self.mbps_label => { column: 0, row: 7, margin: m, valign: VAlign::Center },
            self.mbps_edit => { column: 1, row: 7, margin: m },
            self.generate_button => { column: 0, row: 8, margin: m },
            self.execute_button => { column: 1, row: 8, margin: m, halign: HAlign::Left },
            self.command_label => { column: 0, row: 9, margin: m },
            self.command_box => {
                column: 0,
                row: 10,
                column_span: 4,
                margin: m,
                halign: HAlign::Stretch,
                valign: VAlign::Stretch,
            },
        };
        panel.set_size(csize);
    }

    fn render_children(&mut self) {
        self.status_label.render();
        self.source_label.render();
        self.source_edit.render();
        self.source_browse.render();
        self.source_file_browse.render();
        self.dest_label.render();
        self.dest_edit.render();
        self.dest_browse.render();
        self.move_check.render();
        self.mirror_check.render();
        self.timestamps_check.render();
        self.restartable_check.render();
        self.huge_files_check.render();
        self.threads_label.render();
        self.threads_combo.render();
        self.ipg_label.render();
        self.ipg_combo.render();
        self.mbps_label.render();
        self.mbps_edit.render();
        self.generate_button.render();
        self.execute_button.render();
        self.command_label.render();
        self.command_box.render();
    }
}
