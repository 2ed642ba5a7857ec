//! Selector and class contract the host page must satisfy.

/// Class carried by a like button whose message is liked.
pub const LIKED_CLASS: &str = "btn-primary";
/// Class carried by a like button whose message is not liked.
pub const UNLIKED_CLASS: &str = "btn-secondary";

pub const LIKED_BUTTONS: &str = ".btn-primary";
pub const BUTTONS: &str = "button";
pub const LIKES_DISPLAY: &str = "#likes";
pub const MESSAGES_FORM: &str = "#messages-form";
pub const MODAL_BODY: &str = ".modal-half";
pub const NEW_MESSAGE_LINK: &str = "#new-msg-link";
pub const NEW_MESSAGE_REGION: &str = ".new-msg-form";
pub const NEW_MESSAGE_FORM: &str = "#new-msg-form";
pub const CLOSE_NEW_MESSAGE_FORM: &str = "#close-new-msg-form";

/// Element id (not a selector) of the new-message submit button.
pub const SUBMIT_NEW_POST_ID: &str = "submit-new-post";
