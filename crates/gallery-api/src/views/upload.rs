//! Upload page and its state machine
//!
//! `Empty -> Selected{Idle} -> Selected{Generating|Uploading} -> Selected{Idle}`, with
//! the error overlay kept beside the state. Every new action clears the error first.
//! A successful submit discards the whole view.

use std::fmt::Write;

use gallery_core::{
    AppError, ErrorMetadata, ImageValidator, PhotoFile, UploadPhotoRequest, ValidationError,
};

use super::html::{dev_notice, error_message, escape, page};

pub const UPLOAD_DEV_NOTICE: &str = "Development mode - the photo will be stored locally";
pub const DROP_REJECTED_MESSAGE: &str = "Invalid file. Select an image of at most 10MB";
pub const SUBMIT_INCOMPLETE_MESSAGE: &str = "Please select an image and add a description";

/// Where a file entered the flow; only the rejection message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Picker,
    Drop,
}

impl FileSource {
    fn rejection_message(self, error: &ValidationError) -> &'static str {
        match self {
            FileSource::Picker => error.picker_message(),
            FileSource::Drop => DROP_REJECTED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Generating,
    Uploading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPhoto {
    pub file: PhotoFile,
    /// Data URL, never submitted
    pub preview: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Empty,
    Selected {
        photo: SelectedPhoto,
        activity: Activity,
    },
}

/// Why an action was refused without touching the providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    NoFile,
    Busy,
    Incomplete,
}

/// Why a picked or dropped file was not taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRejection {
    /// A provider call is in flight; the file is ignored and no message is shown
    Busy,
    Invalid(ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    state: UploadState,
    error: Option<String>,
}

impl Default for UploadView {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadView {
    pub fn new() -> Self {
        Self {
            state: UploadState::Empty,
            error: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&SelectedPhoto> {
        match &self.state {
            UploadState::Selected { photo, .. } => Some(photo),
            UploadState::Empty => None,
        }
    }

    pub fn activity(&self) -> Option<Activity> {
        match &self.state {
            UploadState::Selected { activity, .. } => Some(*activity),
            UploadState::Empty => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.activity(), Some(Activity::Generating | Activity::Uploading))
    }

    /// Picker and drop share validation; a rejected file only sets the error.
    ///
    /// Replacing a selected file keeps the description typed so far.
    pub fn select_file(
        &mut self,
        file: PhotoFile,
        source: FileSource,
        validator: &ImageValidator,
    ) -> Result<(), FileRejection> {
        if self.is_busy() {
            return Err(FileRejection::Busy);
        }
        self.error = None;

        if let Err(e) = validator.validate(&file) {
            self.error = Some(source.rejection_message(&e).to_string());
            return Err(FileRejection::Invalid(e));
        }

        let description = self
            .selected()
            .map(|p| p.description.clone())
            .unwrap_or_default();
        let preview = file.to_data_url();
        self.state = UploadState::Selected {
            photo: SelectedPhoto {
                file,
                preview,
                description,
            },
            activity: Activity::Idle,
        };
        Ok(())
    }

    /// "Change image": back to `Empty`
    pub fn change_image(&mut self) {
        if self.is_busy() {
            return;
        }
        self.state = UploadState::Empty;
        self.error = None;
    }

    pub fn set_description(&mut self, text: &str) {
        if let UploadState::Selected {
            photo,
            activity: Activity::Idle,
        } = &mut self.state
        {
            photo.description = text.to_string();
        }
    }

    /// Enter `Generating` and hand out the file to caption
    pub fn begin_generation(&mut self) -> Result<PhotoFile, Refusal> {
        match &mut self.state {
            UploadState::Empty => Err(Refusal::NoFile),
            UploadState::Selected { activity, .. } if *activity != Activity::Idle => {
                Err(Refusal::Busy)
            }
            UploadState::Selected { photo, activity } => {
                self.error = None;
                *activity = Activity::Generating;
                Ok(photo.file.clone())
            }
        }
    }

    /// Success overwrites the description; failure leaves it untouched.
    pub fn finish_generation(&mut self, result: Result<String, AppError>) {
        if let UploadState::Selected { photo, activity } = &mut self.state {
            if *activity != Activity::Generating {
                return;
            }
            *activity = Activity::Idle;
            match result {
                Ok(description) => photo.description = description,
                Err(e) => self.error = Some(e.client_message()),
            }
        }
    }

    /// Enter `Uploading` and build the request, or refuse without calling the provider
    pub fn begin_submit(&mut self) -> Result<UploadPhotoRequest, Refusal> {
        if self.is_busy() {
            return Err(Refusal::Busy);
        }
        self.error = None;

        match &mut self.state {
            UploadState::Selected { photo, activity } if !photo.description.trim().is_empty() => {
                *activity = Activity::Uploading;
                Ok(UploadPhotoRequest {
                    file: photo.file.clone(),
                    description: photo.description.trim().to_string(),
                })
            }
            UploadState::Selected { .. } => {
                self.error = Some(SUBMIT_INCOMPLETE_MESSAGE.to_string());
                Err(Refusal::Incomplete)
            }
            UploadState::Empty => {
                self.error = Some(SUBMIT_INCOMPLETE_MESSAGE.to_string());
                Err(Refusal::NoFile)
            }
        }
    }

    /// Failed upload: back to `Idle` with every field intact
    pub fn fail_submit(&mut self, error: &AppError) {
        if let UploadState::Selected { activity, .. } = &mut self.state {
            if *activity == Activity::Uploading {
                *activity = Activity::Idle;
            }
        }
        self.error = Some(error.client_message());
    }

    pub fn render(&self, draft_path: &str, offline: bool) -> String {
        let mut html = String::new();
        html.push_str("<main class=\"upload-container\">\n<header class=\"upload-header\">\n");
        html.push_str("<a href=\"/\" class=\"back-button\">&larr; Back to Gallery</a>\n");
        html.push_str("<h1>Upload New Photo</h1>\n");
        if offline {
            html.push_str(&dev_notice(UPLOAD_DEV_NOTICE));
            html.push('\n');
        }
        html.push_str("</header>\n<div class=\"upload-content\">\n");

        match &self.state {
            UploadState::Empty => render_file_choice(&mut html, draft_path),
            UploadState::Selected { photo, activity } => {
                render_selected(&mut html, draft_path, photo, *activity)
            }
        }

        if let Some(message) = &self.error {
            html.push_str(&error_message(message));
            html.push('\n');
        }
        html.push_str("</div>\n</main>");

        page("Upload New Photo", &html)
    }
}

fn render_file_choice(html: &mut String, draft_path: &str) {
    let path = escape(draft_path);
    let _ = write!(
        html,
        "<form class=\"file-drop-zone\" method=\"post\" action=\"{path}/file?source=drop\" enctype=\"multipart/form-data\">\
<div class=\"drop-zone-content\"><div class=\"upload-icon\">&#128247;</div>\
<h3>Drag your photo here</h3>\
<p>Supported formats: JPG, PNG, GIF (maximum 10MB)</p>\
<input type=\"file\" name=\"file\" accept=\"image/*\" class=\"drop-input\">\
<button type=\"submit\">Use dropped file</button></div></form>\n\
<form class=\"file-picker\" method=\"post\" action=\"{path}/file?source=picker\" enctype=\"multipart/form-data\">\
<label for=\"file-input\" class=\"file-input-label\">Select File</label>\
<input type=\"file\" id=\"file-input\" name=\"file\" accept=\"image/*\" class=\"file-input\">\
<button type=\"submit\">Continue</button></form>\n"
    );
}

fn render_selected(html: &mut String, draft_path: &str, photo: &SelectedPhoto, activity: Activity) {
    let path = escape(draft_path);
    let busy = if activity == Activity::Idle { "" } else { " disabled" };
    let generate_label = match activity {
        Activity::Generating => "<span class=\"spinner\"></span>Generating description...",
        _ => "Generate description with AI",
    };
    let upload_label = match activity {
        Activity::Uploading => "<span class=\"spinner\"></span>Uploading...",
        _ => "Upload Photo",
    };

    let _ = write!(
        html,
        "<div class=\"upload-form\">\n<div class=\"image-preview-section\">\
<div class=\"image-preview\"><img src=\"{preview}\" alt=\"Preview\" class=\"preview-image\"></div>\
<div class=\"image-info\"><p><strong>File:</strong> {name}</p><p><strong>Size:</strong> {size}</p>\
<form method=\"post\" action=\"{path}/change\"><button type=\"submit\" class=\"change-image-button\"{busy}>Change Image</button></form>\
</div></div>\n\
<form class=\"description-section\" method=\"post\" action=\"{path}/submit\">\
<label for=\"description\" class=\"description-label\">Photo description</label>\
<textarea id=\"description\" name=\"description\" rows=\"4\" class=\"description-textarea\" \
placeholder=\"Write a description of your photo...\">{description}</textarea>\
<div class=\"action-buttons\">\
<button type=\"submit\" formaction=\"{path}/describe\" class=\"generate-button\"{busy}>{generate_label}</button>\
<button type=\"submit\" class=\"upload-button\"{busy}>{upload_label}</button>\
</div></form>\n</div>\n",
        preview = escape(&photo.preview),
        name = escape(&photo.file.name),
        size = escape(&photo.file.size_label()),
        description = escape(&photo.description),
    );
}
