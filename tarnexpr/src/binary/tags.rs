//! Constructor tags carried as the leading element of encoded arrays.
//!
//! Conventions:
//! - An expression is either an immediate token (text string = built-in
//!   name, unsigned integer = nameless variable reference, boolean/float
//!   primitives = literals) or a definite-length array whose first element
//!   selects the constructor.
//! - A leading text string instead of a tag denotes a named variable:
//!   `[name, index]`.
//! - Optional slots (empty annotations, absent digests, the non-empty-list
//!   type position) are carried as null.

pub const APPLICATION: u64 = 0; // [0, f, a1, ..., an], n >= 1, left-nested
pub const LAMBDA: u64 = 1; // [1, A, b] binds `_`; [1, "x", A, b] otherwise
pub const PI: u64 = 2; // same shapes as LAMBDA
pub const OPERATOR: u64 = 3; // [3, code, lhs, rhs]
pub const LIST: u64 = 4; // [4, T] empty; [4, null, x1, ..., xn] non-empty
pub const MERGE: u64 = 6; // [6, handlers, union] or [6, handlers, union, T]
pub const RECORD_TYPE: u64 = 7; // [7, {name: T}]
pub const RECORD: u64 = 8; // [8, {name: value}]
pub const FIELD_ACCESS: u64 = 9; // [9, base, "name"]
pub const PROJECTION: u64 = 10; // [10, base, "a", ...] or [10, base, [T]]
pub const UNION_TYPE: u64 = 11; // [11, {name: T-or-null}]
pub const IF: u64 = 14; // [14, predicate, then, else]
pub const NATURAL: u64 = 15; // [15, n]
pub const INTEGER: u64 = 16; // [16, n]
pub const TEXT: u64 = 18; // [18, "s0", e1, "s1", ..., "sn"]
pub const ASSERT: u64 = 19; // [19, T]
pub const IMPORT: u64 = 24; // [24, digest, mode, scheme, ...]
pub const LET: u64 = 25; // [25, x, T-or-null, v, ..., body]
pub const ANNOTATION: u64 = 26; // [26, base, T]
pub const TO_MAP: u64 = 27; // [27, base] or [27, base, T]

// Import schemes, the fourth element of an IMPORT array.
pub const SCHEME_HTTP: u64 = 0; // [.., 0, using, authority, p0, ..., query]
pub const SCHEME_HTTPS: u64 = 1; // same shape as HTTP
pub const SCHEME_ABSOLUTE: u64 = 2; // [.., 2, p0, ...]
pub const SCHEME_HERE: u64 = 3; // [.., 3, p0, ...]
pub const SCHEME_PARENT: u64 = 4; // [.., 4, p0, ...]
pub const SCHEME_HOME: u64 = 5; // [.., 5, p0, ...]
pub const SCHEME_ENV: u64 = 6; // [.., 6, name]
pub const SCHEME_MISSING: u64 = 7; // [.., 7]

/// Multihash prefix a digest item carries ahead of its 32 hash bytes.
pub const DIGEST_PREFIX: [u8; 2] = [0x12, 0x20];
