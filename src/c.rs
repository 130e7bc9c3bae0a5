// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! C bindings, for native hosts embedding the router.
//!
//! Every pointer returned by these functions is owned by the caller and must be
//! released with the matching `_delete` function.

use super::*;

use std::ffi::{c_char, CString};
use std::ptr::{null_mut, slice_from_raw_parts_mut};

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_chicoana_graph_new() -> *mut Graph {
    match chicoana::graph() {
        Ok(g) => Box::into_raw(Box::new(g)),
        Err(e) => {
            log::error!("failed to build the Chicoana graph: {}", e);
            null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_graph_delete(ptr: *mut Graph) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_graph_len(graph: *const Graph) -> usize {
    graph.as_ref().map(|g| g.len()).unwrap_or(0)
}

/// Writes the position of the node closest to (`lat`, `lng`) into `out`.
/// Returns false (leaving `out` untouched) if there is no such node.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_graph_find_nearest_node(
    graph: *const Graph,
    lat: f64,
    lng: f64,
    out: *mut Coordinate,
) -> bool {
    let nearest = graph
        .as_ref()
        .and_then(|g| g.find_nearest_node(Coordinate::new(lat, lng)));

    match (nearest, out.as_mut()) {
        (Some(node), Some(out)) => {
            *out = node.position();
            true
        }
        _ => false,
    }
}

#[repr(C)]
pub struct CInstruction {
    pub kind: InstructionKind,

    /// NUL-terminated UTF-8 text, owned by the enclosing [CRouteResult].
    pub text: *mut c_char,
    pub distance: f64,
    pub point: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum CRouteResultType {
    Ok = 0,
    NoRoute = 1,
    InvalidCoordinate = 2,
    InvalidReference = 3,
}

#[repr(C)]
pub struct CRouteResult {
    pub type_: CRouteResultType,
    pub path: *mut Coordinate,
    pub path_len: usize,
    pub distance: f64,
    pub duration: u64,
    pub instructions: *mut CInstruction,
    pub instructions_len: usize,
}

/// Hands ownership of a vector's elements to C, as a pointer and length.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, usize) {
    let len = items.len();
    (Box::into_raw(items.into_boxed_slice()) as *mut T, len)
}

/// Reclaims elements handed to C by [into_raw_parts].
unsafe fn from_raw_parts<T>(ptr: *mut T, len: usize) -> Box<[T]> {
    Box::from_raw(slice_from_raw_parts_mut(ptr, len))
}

impl CRouteResult {
    fn ok(route: RouteResult) -> Self {
        let instructions: Vec<CInstruction> = route
            .instructions
            .into_iter()
            .map(|i| CInstruction {
                kind: i.kind,
                // GraphBuilder rejects street names with NULs
                text: CString::new(i.text).unwrap_or_default().into_raw(),
                distance: i.distance,
                point: i.point,
            })
            .collect();

        let (path, path_len) = into_raw_parts(route.path);
        let (instructions, instructions_len) = into_raw_parts(instructions);

        Self {
            type_: CRouteResultType::Ok,
            path,
            path_len,
            distance: route.distance,
            duration: route.duration,
            instructions,
            instructions_len,
        }
    }

    fn empty(type_: CRouteResultType) -> Self {
        Self {
            type_,
            path: null_mut(),
            path_len: 0,
            distance: 0.0,
            duration: 0,
            instructions: null_mut(),
            instructions_len: 0,
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_calculate_route(
    graph: *const Graph,
    start: Coordinate,
    end: Coordinate,
    profile: Profile,
    language: Language,
) -> CRouteResult {
    let Some(graph) = graph.as_ref() else {
        return CRouteResult::empty(CRouteResultType::NoRoute);
    };

    match calculate_route(graph, start, end, &Options { profile, language }) {
        Ok(Some(route)) => CRouteResult::ok(route),
        Ok(None) => CRouteResult::empty(CRouteResultType::NoRoute),
        Err(RouteError::InvalidCoordinate { .. }) => {
            CRouteResult::empty(CRouteResultType::InvalidCoordinate)
        }
        Err(RouteError::Search(_)) => CRouteResult::empty(CRouteResultType::InvalidReference),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_route_result_delete(result: CRouteResult) {
    if !result.path.is_null() {
        drop(from_raw_parts(result.path, result.path_len));
    }

    if !result.instructions.is_null() {
        for instruction in from_raw_parts(result.instructions, result.instructions_len).iter() {
            if !instruction.text.is_null() {
                drop(CString::from_raw(instruction.text));
            }
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offroute_earth_distance(a: Coordinate, b: Coordinate) -> f64 {
    earth_distance(a, b)
}
