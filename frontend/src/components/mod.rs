pub mod lead_modal;
pub mod result_popup;

pub use lead_modal::LeadModal;
pub use result_popup::ResultPopup;
