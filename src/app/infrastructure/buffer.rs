use std::ffi::c_void;

use fltk::app::Sender;
use fltk::text::TextBuffer;

use crate::app::domain::document::DocumentId;
use crate::app::domain::messages::Message;

/// Copy the contents of an FLTK text buffer into a `String`.
///
/// `TextBuffer::text()` in fltk-rs copies the `malloc()`'d string returned
/// by `Fl_Text_Buffer_text()` but never frees it, so every call leaks a
/// buffer-sized allocation. The editor reads the buffer on each keystroke to
/// rebuild the outline and preview, which makes that leak grow quickly.
pub fn buffer_text_no_leak(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live Fl_Text_Buffer owned by `buf`.
    // Fl_Text_Buffer_text returns a NUL-terminated copy allocated with
    // malloc (or null), which is read once and released with free().
    unsafe {
        let ptr = Fl_Text_Buffer_text(buf.as_ptr() as *mut std::ffi::c_void);
        if ptr.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        text
    }
}

/// The closure type stored behind the FFI `void* cbArg`.
type ModifyCb = dyn FnMut(i32, i32);

/// Fixed C callback handed to FLTK. Because every buffer registers this same
/// function pointer, `remove_modify_callback` can find the entry again by
/// pointer equality, which fltk-rs's own closure wrapper cannot.
///
/// # Safety
///
/// `cb_arg` must be the pointer produced by `DocumentBuffer::new`, still
/// registered with the buffer that invokes the callback.
unsafe extern "C" fn modify_shim(
    _pos: std::ffi::c_int,
    n_inserted: std::ffi::c_int,
    n_deleted: std::ffi::c_int,
    _n_restyled: std::ffi::c_int,
    _deleted_text: *const std::ffi::c_char,
    cb_arg: *mut c_void,
) {
    if cb_arg.is_null() {
        log::warn!("modify_shim called with null callback argument");
        return;
    }
    // SAFETY: non-null cb_arg points to the Box<ModifyCb> leaked in
    // DocumentBuffer::new, which stays alive until Drop unregisters it.
    unsafe {
        let cb: &mut Box<ModifyCb> = &mut *(cb_arg as *mut Box<ModifyCb>);
        cb(n_inserted, n_deleted);
    }
}

type ModifyShim = unsafe extern "C" fn(
    std::ffi::c_int,
    std::ffi::c_int,
    std::ffi::c_int,
    std::ffi::c_int,
    *const std::ffi::c_char,
    *mut c_void,
);

unsafe extern "C" {
    fn Fl_Text_Buffer_add_modify_callback(buf: *mut c_void, cb: Option<ModifyShim>, cb_arg: *mut c_void);
    fn Fl_Text_Buffer_remove_modify_callback(buf: *mut c_void, cb: Option<ModifyShim>, cb_arg: *mut c_void);
}

/// Editor buffer owned by one open document.
///
/// Every insertion or deletion sends `Message::BufferModified` for the
/// document. Dropping the value unregisters the callback and empties the
/// buffer so FLTK releases its text.
pub struct DocumentBuffer {
    buffer: TextBuffer,
    modify_cb_data: *mut c_void,
}

impl DocumentBuffer {
    pub fn new(id: DocumentId, content: &str, sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        // Load before registering so the initial text is not reported as an edit.
        buffer.set_text(content);

        let cb: Box<ModifyCb> = Box::new(move |inserted: i32, deleted: i32| {
            if inserted > 0 || deleted > 0 {
                sender.send(Message::BufferModified(id));
            }
        });
        let modify_cb_data = Box::into_raw(Box::new(cb)) as *mut c_void;

        // SAFETY: modify_cb_data stays valid until Drop removes this exact
        // (modify_shim, modify_cb_data) pair from the buffer.
        unsafe {
            Fl_Text_Buffer_add_modify_callback(
                buffer.as_ptr() as *mut c_void,
                Some(modify_shim),
                modify_cb_data,
            );
        }

        Self {
            buffer,
            modify_cb_data,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        buffer_text_no_leak(&self.buffer)
    }
}

impl Drop for DocumentBuffer {
    fn drop(&mut self) {
        if self.modify_cb_data.is_null() {
            return;
        }
        // SAFETY: unregister first so FLTK can no longer call modify_shim
        // with the pointer, then reclaim the box.
        unsafe {
            Fl_Text_Buffer_remove_modify_callback(
                self.buffer.as_ptr() as *mut c_void,
                Some(modify_shim),
                self.modify_cb_data,
            );
            drop(Box::from_raw(self.modify_cb_data as *mut Box<ModifyCb>));
        }
        self.modify_cb_data = std::ptr::null_mut();
        self.buffer.set_text("");
    }
}
