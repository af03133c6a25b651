pub const CONTAINER: &str = "min-h-screen w-full flex flex-col items-center justify-center px-4 py-8 bg-gray-50";
pub const CARD: &str = "bg-white p-6 sm:p-8 rounded-2xl shadow-xl max-w-2xl w-full mx-auto border border-gray-100";
pub const TEXT_H1: &str = "text-3xl font-bold mb-6 text-center text-[#00727A]";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900";
pub const STATUS: &str = "mt-6 text-center text-lg font-semibold text-[#00727A]";
pub const WHEEL_FRAME: &str = "relative mx-auto w-full max-w-[450px] aspect-square";
pub const WHEEL_CANVAS: &str = "w-full h-full cursor-pointer rounded-full focus:outline-none focus:ring-4 focus:ring-[#7ec4c6]";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white py-2 px-3 text-gray-900 shadow-sm ring-1 ring-inset ring-gray-300 placeholder:text-gray-400 focus:ring-2 focus:ring-[#00727A]";
pub const INPUT_ERROR: &str = "mt-2 block w-full rounded-lg border-0 bg-white py-2 px-3 text-gray-900 shadow-sm ring-2 ring-inset ring-red-500 focus:ring-2 focus:ring-inset focus:ring-red-500 sm:text-sm";
pub const FORM: &str = "mt-4 space-y-4";
pub const BUTTON_PRIMARY: &str = "inline-flex w-full items-center justify-center px-4 py-3 rounded-lg font-semibold text-white bg-[#00727A] hover:bg-[#005a60] shadow-lg transition-all duration-300 disabled:opacity-60 disabled:cursor-not-allowed";
pub const LOADING_SPINNER: &str = "animate-spin mr-2 h-5 w-5 text-white";

// Overlays
pub const BACKDROP: &str = "fixed inset-0 z-50 flex items-center justify-center bg-black/50 backdrop-blur-sm px-4";
pub const MODAL: &str = "relative bg-white rounded-xl shadow-xl p-8 max-w-md w-full";
pub const MODAL_CLOSE: &str = "absolute top-3 right-3 p-2 text-gray-500 hover:text-gray-900 rounded-lg transition-colors duration-200 disabled:opacity-40 disabled:cursor-not-allowed";
pub const POPUP_MESSAGE: &str = "text-2xl font-bold text-center text-[#00727A] mb-6";
pub const ALERT_ERROR: &str = "bg-red-50 border border-red-200 rounded-lg p-3 text-sm text-red-700";
pub const ALERT_WARNING: &str = "p-3 text-sm text-yellow-800 rounded-lg bg-yellow-50";
