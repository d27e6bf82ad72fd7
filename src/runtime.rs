//! The JavaScript utility routines embedded verbatim into every compiled
//! function. Outputs are mutually independent and self-sufficient, so the
//! routines are duplicated per output instead of shared through a module.

/// Reserved name the literal variable `.` is aliased to, and the property
/// under which the iteration index is attached when enabled.
pub const CURRENT_ALIAS: &str = "__it";

/// Six-entity HTML escape, applied to escaped interpolations.
pub const ESCAPE: &str = r#"var __entityMap = {
"&": "&amp;",
"<": "&lt;",
">": "&gt;",
'"': '&quot;',
"'": '&#39;',
"/": '&#x2F;'
};
var __escape = function(value) {
return String(value).replace(/[&<>"'\/]/g, function(ch) {
return __entityMap[ch];
});
};"#;

/// Walks the context stack from the innermost frame outwards and returns the
/// first own, defined property named `name`. Zero-argument callables are
/// invoked with their owning frame as receiver. Absent names resolve to the
/// empty string, so missing data renders as empty text (and stays falsy for
/// section tests) instead of throwing.
pub const GET: &str = r#"var __get = function(stack, name) {
for (var i = stack.length - 1; i >= 0; i--) {
var frame = stack[i];
if (frame === null || frame === undefined) continue;
if (Object.prototype.hasOwnProperty.call(frame, name) && frame[name] !== undefined) {
if (typeof frame[name] === 'function') return frame[name].call(frame);
return frame[name];
}
}
return "";
};"#;

/// Canonical array test, not generic enumerability.
pub const IS_ARRAY: &str = r#"var __isArray = Array.isArray || function(value) {
return Object.prototype.toString.call(value) === '[object Array]';
};"#;

/// Stable-order iteration: native forEach for arrays, length-based indexing
/// for other array-likes, own-key enumeration order for keyed records.
pub const EACH: &str = r#"var __each = function(obj, iterator) {
if (obj === null || obj === undefined) return;
if (__isArray(obj) && typeof obj.forEach === 'function') {
obj.forEach(iterator);
} else if (obj.length === +obj.length) {
for (var i = 0; i < obj.length; i++) iterator(obj[i], i);
} else {
for (var key in obj) {
if (Object.prototype.hasOwnProperty.call(obj, key)) iterator(obj[key], key);
}
}
};"#;

/// Pushes an iterated element onto the stack with the zero-based index
/// attached under `__it`. Keyed records are shallow-copied first so the
/// caller's data is never mutated; arrays and primitives are pushed as-is.
/// Only emitted when [`CompileOptions::attach_index`] is enabled.
///
/// [`CompileOptions::attach_index`]: crate::codegen::CompileOptions
pub const ENTER: &str = r#"var __enter = function(stack, value, index) {
if (value !== null && typeof value === 'object' && !__isArray(value)) {
var frame = {};
for (var key in value) {
if (Object.prototype.hasOwnProperty.call(value, key)) frame[key] = value[key];
}
frame["__it"] = index;
stack.push(frame);
} else {
stack.push(value);
}
};"#;

/// Returns the runtime source inlined into a compiled function.
pub fn prelude(attach_index: bool) -> String {
    let mut routines = vec![ESCAPE, GET, IS_ARRAY, EACH];
    if attach_index {
        routines.push(ENTER);
    }
    routines.join("\n")
}
