//! Closed-form local matrices of single triangles and pairs of adjacent triangles.
use crate::affine::AffineMap;
use crate::config::Tolerances;
use crate::coupling::{resolve_edge_coupling_with_tolerance, EdgeCoupling};
use crate::error::KernelError;
use crate::geometry::Triangle2d;
use crate::reference::{LocalEdge, ReferenceIntegralTable};
use crate::Real;
use log::debug;
use nalgebra::{Matrix3, Vector3};
use std::fmt;

mod boundary;
mod flux;
mod mass;
mod neumann;
mod penalty;
mod stiffness;

pub use boundary::*;
pub use flux::*;
pub use mass::*;
pub use neumann::*;
pub use penalty::*;
pub use stiffness::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LocalMatrixKind {
    Mass,
    Stiffness,
    Flux,
    Boundary,
    ArtificialFlux,
    NeumannConstraint,
    InterfacePenalty,
}

impl fmt::Display for LocalMatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mass => "mass",
            Self::Stiffness => "stiffness",
            Self::Flux => "flux",
            Self::Boundary => "boundary",
            Self::ArtificialFlux => "artificial flux",
            Self::NeumannConstraint => "Neumann constraint",
            Self::InterfacePenalty => "interface penalty",
        };
        write!(f, "{name}")
    }
}

/// A local matrix together with the geometric entities it was computed from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalMatrix<T: Real, M> {
    kind: LocalMatrixKind,
    element: Triangle2d<T>,
    neighbor: Option<Triangle2d<T>>,
    edge: Option<LocalEdge>,
    matrix: M,
}

impl<T: Real, M> LocalMatrix<T, M> {
    pub fn kind(&self) -> LocalMatrixKind {
        self.kind
    }

    pub fn element(&self) -> &Triangle2d<T> {
        &self.element
    }

    /// The adjacent triangle of inter-element terms.
    pub fn neighbor(&self) -> Option<&Triangle2d<T>> {
        self.neighbor.as_ref()
    }

    /// The local edge of `element` that edge terms are integrated over.
    pub fn edge(&self) -> Option<LocalEdge> {
        self.edge
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    pub fn into_matrix(self) -> M {
        self.matrix
    }

    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> LocalMatrix<T, N> {
        LocalMatrix {
            kind: self.kind,
            element: self.element,
            neighbor: self.neighbor,
            edge: self.edge,
            matrix: f(self.matrix),
        }
    }
}

/// Computes local matrices from vertex coordinates.
///
/// The builder holds nothing but the reference integrals and the tolerances, so it is cheap to
/// copy and can be shared freely between threads. All methods validate their input, returning
/// [`KernelError::InvalidEdgeIndex`] for edge indices outside `{0, 1, 2}` and
/// [`KernelError::DegenerateGeometry`] for triangles with vanishing area.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalMatrixBuilder<T: Real> {
    table: ReferenceIntegralTable<T>,
    tolerances: Tolerances<T>,
}

impl<T: Real> Default for LocalMatrixBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> LocalMatrixBuilder<T> {
    pub fn new() -> Self {
        Self {
            table: ReferenceIntegralTable::new(),
            tolerances: Tolerances::default(),
        }
    }

    pub fn with_tolerances(self, tolerances: Tolerances<T>) -> Self {
        Self { tolerances, ..self }
    }

    pub fn tolerances(&self) -> &Tolerances<T> {
        &self.tolerances
    }

    pub fn reference_table(&self) -> &ReferenceIntegralTable<T> {
        &self.table
    }

    /// Validates the triangle and builds its affine map.
    pub fn affine_map(&self, triangle: &Triangle2d<T>) -> Result<AffineMap<T>, KernelError<T>> {
        AffineMap::from_triangle(triangle, &self.tolerances).map_err(|err| {
            debug!("Rejected triangle: {}", err);
            err
        })
    }

    fn local_edge(&self, triangle: &Triangle2d<T>, edge: usize) -> Result<LocalEdge, KernelError<T>> {
        LocalEdge::try_from(edge).map_err(|err| {
            let err = KernelError::invalid_edge(triangle, err);
            debug!("Rejected edge: {}", err);
            err
        })
    }

    pub fn mass(&self, triangle: &Triangle2d<T>) -> Result<LocalMatrix<T, Matrix3<T>>, KernelError<T>> {
        let map = self.affine_map(triangle)?;
        Ok(LocalMatrix {
            kind: LocalMatrixKind::Mass,
            element: *triangle,
            neighbor: None,
            edge: None,
            matrix: compute_element_mass_matrix(&map, &self.table),
        })
    }

    pub fn stiffness(&self, triangle: &Triangle2d<T>) -> Result<LocalMatrix<T, Matrix3<T>>, KernelError<T>> {
        let map = self.affine_map(triangle)?;
        Ok(LocalMatrix {
            kind: LocalMatrixKind::Stiffness,
            element: *triangle,
            neighbor: None,
            edge: None,
            matrix: compute_element_stiffness_matrix(&map, &self.table),
        })
    }

    pub fn boundary(
        &self,
        triangle: &Triangle2d<T>,
        edge: usize,
    ) -> Result<LocalMatrix<T, Matrix3<T>>, KernelError<T>> {
        let edge = self.local_edge(triangle, edge)?;
        let map = self.affine_map(triangle)?;
        Ok(LocalMatrix {
            kind: LocalMatrixKind::Boundary,
            element: *triangle,
            neighbor: None,
            edge: Some(edge),
            matrix: compute_boundary_matrix(&map, &self.table, edge),
        })
    }

    /// The averaged boundary trace across local edge `edge` of `element`, driven by the nodal
    /// values of `neighbor`.
    ///
    /// Passing the same triangle twice gives half of [`boundary`](Self::boundary).
    pub fn artificial_flux(
        &self,
        element: &Triangle2d<T>,
        neighbor: &Triangle2d<T>,
        edge: usize,
    ) -> Result<LocalMatrix<T, Matrix3<T>>, KernelError<T>> {
        let edge = self.local_edge(element, edge)?;
        let element_map = self.affine_map(element)?;
        let neighbor_map = self.affine_map(neighbor)?;
        Ok(LocalMatrix {
            kind: LocalMatrixKind::ArtificialFlux,
            element: *element,
            neighbor: Some(*neighbor),
            edge: Some(edge),
            matrix: compute_artificial_flux_matrix(&element_map, &neighbor_map, &self.table, edge),
        })
    }

    /// The flux coupling across local edge `edge` of `element`, driven by the nodal values of
    /// `neighbor`.
    ///
    /// Passing the same triangle twice gives the single-element flux matrix.
    pub fn flux(
        &self,
        element: &Triangle2d<T>,
        neighbor: &Triangle2d<T>,
        edge: usize,
    ) -> Result<LocalMatrix<T, FluxMatrix<T>>, KernelError<T>> {
        let edge = self.local_edge(element, edge)?;
        let element_map = self.affine_map(element)?;
        let neighbor_map = self.affine_map(neighbor)?;
        Ok(LocalMatrix {
            kind: LocalMatrixKind::Flux,
            element: *element,
            neighbor: Some(*neighbor),
            edge: Some(edge),
            matrix: compute_flux_matrix(&element_map, &neighbor_map, &self.table, edge),
        })
    }

    /// The Neumann constraint across local edge `edge` of `element`, applied to the nodal values
    /// of `neighbor`.
    ///
    /// Passing the same triangle twice gives the single-element constraint.
    pub fn neumann_constraint(
        &self,
        element: &Triangle2d<T>,
        neighbor: &Triangle2d<T>,
        edge: usize,
    ) -> Result<LocalMatrix<T, Matrix3<T>>, KernelError<T>> {
        let edge = self.local_edge(element, edge)?;
        let element_map = self.affine_map(element)?;
        let neighbor_map = self.affine_map(neighbor)?;
        Ok(LocalMatrix {
            kind: LocalMatrixKind::NeumannConstraint,
            element: *element,
            neighbor: Some(*neighbor),
            edge: Some(edge),
            matrix: compute_neumann_constraint_matrix(&element_map, &neighbor_map, &self.table, edge),
        })
    }

    /// The penalized jump across local edge `edge` of `element` with penalty parameter `penalty`.
    pub fn interface_penalty(
        &self,
        element: &Triangle2d<T>,
        neighbor: &Triangle2d<T>,
        edge: usize,
        penalty: T,
    ) -> Result<LocalMatrix<T, InterfacePenalty<T>>, KernelError<T>> {
        let edge = self.local_edge(element, edge)?;
        let element_map = self.affine_map(element)?;
        let neighbor_map = self.affine_map(neighbor)?;
        let self_constraint = compute_neumann_constraint_matrix(&element_map, &element_map, &self.table, edge);
        let neighbor_constraint = compute_neumann_constraint_matrix(&element_map, &neighbor_map, &self.table, edge);
        Ok(LocalMatrix {
            kind: LocalMatrixKind::InterfacePenalty,
            element: *element,
            neighbor: Some(*neighbor),
            edge: Some(edge),
            matrix: InterfacePenalty::from_constraints(&self_constraint, &neighbor_constraint, penalty),
        })
    }

    /// The load `N(tri, tri, n) u` of prescribed nodal values `u` on a Neumann edge.
    pub fn neumann_load(
        &self,
        triangle: &Triangle2d<T>,
        edge: usize,
        values: &Vector3<T>,
    ) -> Result<Vector3<T>, KernelError<T>> {
        let edge = self.local_edge(triangle, edge)?;
        let map = self.affine_map(triangle)?;
        Ok(compute_neumann_constraint_matrix(&map, &map, &self.table, edge) * values)
    }

    /// The load `boundary(tri, n) u + σ N(tri, tri, n) u` of prescribed nodal values `u` on a
    /// Dirichlet edge, where `σ` is the penalty parameter `penalty`.
    pub fn dirichlet_load(
        &self,
        triangle: &Triangle2d<T>,
        edge: usize,
        values: &Vector3<T>,
        penalty: T,
    ) -> Result<Vector3<T>, KernelError<T>> {
        let edge = self.local_edge(triangle, edge)?;
        let map = self.affine_map(triangle)?;
        let natural = compute_boundary_matrix(&map, &self.table, edge) * values;
        let penalized = compute_neumann_constraint_matrix(&map, &map, &self.table, edge) * values;
        Ok(natural + penalized * penalty)
    }

    /// Locates the edge shared by two triangles, using the configured vertex tolerance.
    pub fn resolve_coupling(&self, first: &Triangle2d<T>, second: &Triangle2d<T>) -> Result<EdgeCoupling, KernelError<T>> {
        resolve_edge_coupling_with_tolerance(first, second, self.tolerances.vertex_distance)
    }
}

/// The mass matrix of the triangle, with default tolerances.
pub fn mass_matrix<T: Real>(triangle: &Triangle2d<T>) -> Result<Matrix3<T>, KernelError<T>> {
    LocalMatrixBuilder::new()
        .mass(triangle)
        .map(LocalMatrix::into_matrix)
}

/// The stiffness matrix of the triangle, with default tolerances.
pub fn stiffness_matrix<T: Real>(triangle: &Triangle2d<T>) -> Result<Matrix3<T>, KernelError<T>> {
    LocalMatrixBuilder::new()
        .stiffness(triangle)
        .map(LocalMatrix::into_matrix)
}

/// The boundary trace matrix of local edge `edge`, with default tolerances.
pub fn boundary_matrix<T: Real>(triangle: &Triangle2d<T>, edge: usize) -> Result<Matrix3<T>, KernelError<T>> {
    LocalMatrixBuilder::new()
        .boundary(triangle, edge)
        .map(LocalMatrix::into_matrix)
}

/// The artificial flux of `element` with `neighbor`, with default tolerances.
pub fn artificial_flux_matrix<T: Real>(
    element: &Triangle2d<T>,
    neighbor: &Triangle2d<T>,
    edge: usize,
) -> Result<Matrix3<T>, KernelError<T>> {
    LocalMatrixBuilder::new()
        .artificial_flux(element, neighbor, edge)
        .map(LocalMatrix::into_matrix)
}

/// The flux coupling of `element` with `neighbor`, with default tolerances.
pub fn flux_matrix<T: Real>(
    element: &Triangle2d<T>,
    neighbor: &Triangle2d<T>,
    edge: usize,
) -> Result<FluxMatrix<T>, KernelError<T>> {
    LocalMatrixBuilder::new()
        .flux(element, neighbor, edge)
        .map(LocalMatrix::into_matrix)
}

/// The Neumann constraint of `element` with `neighbor`, with default tolerances.
pub fn neumann_constraint_matrix<T: Real>(
    element: &Triangle2d<T>,
    neighbor: &Triangle2d<T>,
    edge: usize,
) -> Result<Matrix3<T>, KernelError<T>> {
    LocalMatrixBuilder::new()
        .neumann_constraint(element, neighbor, edge)
        .map(LocalMatrix::into_matrix)
}
