use slotmap::SlotMap;
use smallvec::{SmallVec, smallvec};

use crate::errors::{GraphError, Result};
use crate::resources::{BoundingBox, DataArray, Image, Material};
use crate::scene::bounds::BoundsCache;
use crate::scene::camera::Camera;
use crate::scene::group::Group;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::object::{Elements, Object, ObjectKind, ObjectType};
use crate::scene::shape::{Plot, Shape};
use crate::scene::signal::Signal;
use crate::scene::texture::{Texture, TextureTransform};
use crate::scene::update::{Update, UpdateAction};
use crate::scene::ObjectId;
use crate::settings::GraphSettings;

/// The arena holding every object of a scene.
///
/// Parents reference children through keys stored in the parent (group
/// children and named slots); children know their parents only through the
/// `owners` multiset, which is used for update routing and never for
/// lifetime. Objects live until [`SceneGraph::destroy`] removes them.
pub struct SceneGraph {
    pub(crate) objects: SlotMap<ObjectId, Object>,
    settings: GraphSettings,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! typed_getters {
    ($($get:ident => $variant:ident($ty:ty), $expected:literal;)*) => {
        impl SceneGraph {
            $(
                pub fn $get(&self, id: ObjectId) -> Result<&$ty> {
                    match &self.get_object(id)?.kind {
                        ObjectKind::$variant(value) => Ok(value),
                        other => Err(GraphError::KindMismatch {
                            id,
                            expected: $expected,
                            found: other.object_type(),
                        }),
                    }
                }
            )*
        }
    };
}

// Mutable access is only handed out for payloads whose edits cannot break a
// graph invariant (slots and vertex data stay behind dedicated setters).
macro_rules! typed_getters_mut {
    ($($get:ident => $variant:ident($ty:ty), $expected:literal;)*) => {
        impl SceneGraph {
            $(
                pub fn $get(&mut self, id: ObjectId) -> Result<&mut $ty> {
                    match &mut self.object_mut(id)?.kind {
                        ObjectKind::$variant(value) => Ok(value),
                        other => Err(GraphError::KindMismatch {
                            id,
                            expected: $expected,
                            found: other.object_type(),
                        }),
                    }
                }
            )*
        }
    };
}

typed_getters! {
    get_group => Group(Group), "Group";
    get_shape => Shape(Shape), "Shape";
    get_plot => Plot(Plot), "PointSet or LineSet";
    get_mesh => Mesh(Mesh), "Mesh";
    get_material => Material(Material), "Material";
    get_texture => Texture(Texture), "Texture";
    get_texture_transform => TextureTransform(TextureTransform), "TextureTransform";
    get_image => Image(Image), "Image";
    get_array => Array(DataArray), "data array";
    get_light => Light(Light), "Light";
    get_camera => Camera(Camera), "Camera";
}

typed_getters_mut! {
    get_plot_mut => Plot(Plot), "PointSet or LineSet";
    get_mesh_mut => Mesh(Mesh), "Mesh";
    get_material_mut => Material(Material), "Material";
    get_texture_mut => Texture(Texture), "Texture";
    get_texture_transform_mut => TextureTransform(TextureTransform), "TextureTransform";
    get_image_mut => Image(Image), "Image";
    get_light_mut => Light(Light), "Light";
    get_camera_mut => Camera(Camera), "Camera";
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(GraphSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: GraphSettings) -> Self {
        Self {
            objects: SlotMap::with_key(),
            settings,
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GraphSettings {
        &mut self.settings
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter()
    }

    // ========================================================================
    // Object access
    // ========================================================================

    pub fn get_object(&self, id: ObjectId) -> Result<&Object> {
        self.objects.get(id).ok_or(GraphError::StaleHandle(id))
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object> {
        self.objects.get_mut(id).ok_or(GraphError::StaleHandle(id))
    }

    pub(crate) fn group_mut(&mut self, id: ObjectId) -> Result<&mut Group> {
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Group(group) => Ok(group),
            other => Err(GraphError::KindMismatch {
                id,
                expected: "Group",
                found: other.object_type(),
            }),
        }
    }

    /// Mutable access to a data array.
    ///
    /// Cached bounds of every mesh or plot using the array (and of their
    /// ancestors) are invalidated up front, since the caller may rewrite
    /// the vertices.
    pub fn get_array_mut(&mut self, id: ObjectId) -> Result<&mut DataArray> {
        self.get_array(id)?;
        self.invalidate_bounds_upward(id);
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Array(array) => Ok(array),
            other => Err(GraphError::KindMismatch {
                id,
                expected: "data array",
                found: other.object_type(),
            }),
        }
    }

    pub fn name(&self, id: ObjectId) -> Result<&str> {
        Ok(&self.get_object(id)?.name)
    }

    pub fn set_name(&mut self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        self.object_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn owners(&self, id: ObjectId) -> Result<&[ObjectId]> {
        Ok(&self.get_object(id)?.owners)
    }

    pub fn owner_count(&self, id: ObjectId) -> Result<usize> {
        Ok(self.get_object(id)?.owners.len())
    }

    pub fn object_type(&self, id: ObjectId) -> Result<ObjectType> {
        Ok(self.get_object(id)?.object_type())
    }

    pub fn is_node(&self, id: ObjectId) -> Result<bool> {
        Ok(self.object_type(id)?.is_node())
    }

    /// First object with the given name, in arena order.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Nodes that nobody owns.
    pub fn roots(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, object)| object.owners.is_empty() && object.is_node())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn sig_updated(&mut self, id: ObjectId) -> Result<&mut Signal<Update>> {
        Ok(&mut self.object_mut(id)?.sig_updated)
    }

    /// Fires `true` when the object gains its first owner and `false` when
    /// it loses its last one.
    pub fn sig_graph_connection(&mut self, id: ObjectId) -> Result<&mut Signal<bool>> {
        Ok(&mut self.object_mut(id)?.sig_graph_connection)
    }

    // ========================================================================
    // Factories
    // ========================================================================

    pub(crate) fn insert(&mut self, name: String, kind: ObjectKind) -> ObjectId {
        self.objects.insert(Object::new(name, kind))
    }

    /// Inserts a caller-built payload. Slot references only enter the graph
    /// through the slot setters, which register the owner.
    fn insert_detached(&mut self, name: String, mut kind: ObjectKind) -> ObjectId {
        kind.take_slots();
        kind.invalidate_bounds();
        self.insert(name, kind)
    }

    pub fn create_node(&mut self, name: impl Into<String>) -> ObjectId {
        self.insert(name.into(), ObjectKind::Node)
    }

    pub fn create_preprocessed(&mut self, name: impl Into<String>) -> ObjectId {
        self.insert(name.into(), ObjectKind::Preprocessed)
    }

    pub fn create_shape(&mut self, name: impl Into<String>) -> ObjectId {
        self.insert(name.into(), ObjectKind::Shape(Shape::default()))
    }

    pub fn create_point_set(&mut self, name: impl Into<String>, point_size: f32) -> ObjectId {
        self.insert(name.into(), ObjectKind::Plot(Plot::point_set(point_size)))
    }

    pub fn create_line_set(&mut self, name: impl Into<String>, line_width: f32) -> ObjectId {
        self.insert(name.into(), ObjectKind::Plot(Plot::line_set(line_width)))
    }

    pub fn create_light(&mut self, name: impl Into<String>, light: Light) -> ObjectId {
        self.insert(name.into(), ObjectKind::Light(light))
    }

    pub fn create_camera(&mut self, name: impl Into<String>, camera: Camera) -> ObjectId {
        self.insert(name.into(), ObjectKind::Camera(camera))
    }

    /// Adds a mesh payload. Slots carried by `mesh` are cleared and its
    /// cached bounds start stale; attach arrays through the slot setters.
    pub fn create_mesh(&mut self, name: impl Into<String>, mesh: Mesh) -> ObjectId {
        self.insert_detached(name.into(), ObjectKind::Mesh(mesh))
    }

    pub fn create_material(&mut self, name: impl Into<String>, material: Material) -> ObjectId {
        self.insert(name.into(), ObjectKind::Material(material))
    }

    /// Adds a texture payload. Like [`SceneGraph::create_mesh`], slots
    /// carried by `texture` are cleared.
    pub fn create_texture(&mut self, name: impl Into<String>, texture: Texture) -> ObjectId {
        self.insert_detached(name.into(), ObjectKind::Texture(texture))
    }

    pub fn create_texture_transform(
        &mut self,
        name: impl Into<String>,
        transform: TextureTransform,
    ) -> ObjectId {
        self.insert(name.into(), ObjectKind::TextureTransform(transform))
    }

    pub fn create_image(&mut self, name: impl Into<String>, image: Image) -> ObjectId {
        self.insert(name.into(), ObjectKind::Image(image))
    }

    pub fn create_array(&mut self, name: impl Into<String>, array: DataArray) -> ObjectId {
        self.insert(name.into(), ObjectKind::Array(array))
    }

    // ========================================================================
    // Ownership protocol
    // ========================================================================

    /// Registers `owner` once more on `id`. Fires the connection signal on
    /// the first registration.
    pub(crate) fn add_owner(&mut self, id: ObjectId, owner: ObjectId) -> Result<()> {
        let object = self.object_mut(id)?;
        object.owners.push(owner);
        if object.owners.len() == 1 {
            object.sig_graph_connection.emit(&true);
        }
        Ok(())
    }

    /// Like [`Self::add_owner`], then propagates `update` from `id` through
    /// all of its owners (the new one included) before the connection
    /// signal fires.
    pub(crate) fn add_owner_with_update(
        &mut self,
        id: ObjectId,
        owner: ObjectId,
        update: &mut Update,
    ) -> Result<()> {
        let object = self.object_mut(id)?;
        object.owners.push(owner);
        let connected = object.owners.len() == 1;

        self.transfer_update(id, update);

        if connected {
            self.object_mut(id)?.sig_graph_connection.emit(&true);
        }
        Ok(())
    }

    /// Drops one registration of `owner` from `id`. Returns `false` if
    /// `owner` was not registered.
    pub(crate) fn remove_owner(&mut self, id: ObjectId, owner: ObjectId) -> Result<bool> {
        let object = self.object_mut(id)?;
        let Some(position) = object.owners.iter().position(|&o| o == owner) else {
            return Ok(false);
        };
        object.owners.remove(position);
        if object.owners.is_empty() {
            object.sig_graph_connection.emit(&false);
        }
        Ok(true)
    }

    // ========================================================================
    // Update propagation
    // ========================================================================

    /// Delivers `update` to `id` and every transitive owner.
    ///
    /// An owner reachable through several edges receives the update once per
    /// edge. The path inside `update` is restored before returning.
    pub fn notify_update(&mut self, id: ObjectId, update: &mut Update) -> Result<()> {
        self.get_object(id)?;
        self.transfer_update(id, update);
        Ok(())
    }

    pub fn notify(&mut self, id: ObjectId, action: UpdateAction) -> Result<()> {
        let mut update = Update::new(action);
        self.notify_update(id, &mut update)
    }

    pub(crate) fn transfer_update(&mut self, id: ObjectId, update: &mut Update) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        object.kind.invalidate_bounds();

        update.push(id);
        log::trace!("Update {:?} reached {id:?} (depth {})", update.action(), update.path().len());
        object.sig_updated.emit(update);

        let owners = object.owners.clone();
        for owner in owners {
            self.transfer_update(owner, update);
        }
        update.pop();
    }

    /// Marks the cached bounds of `id` and of every transitive owner stale.
    ///
    /// A valid cache implies valid caches on everything below it, so the
    /// walk stops at caches that are already invalid.
    pub(crate) fn invalidate_bounds_upward(&self, id: ObjectId) {
        let mut stack: SmallVec<[ObjectId; 8]> = smallvec![id];
        while let Some(current) = stack.pop() {
            let Some(object) = self.objects.get(current) else {
                continue;
            };
            if object.kind.invalidate_bounds() == Some(false) {
                continue;
            }
            stack.extend(object.owners.iter().copied());
        }
    }

    // ========================================================================
    // Bounds
    // ========================================================================

    /// Axis-aligned bounds of `id` in the space of its owners.
    ///
    /// Objects without geometry report [`BoundingBox::EMPTY`].
    pub fn bounding_box(&self, id: ObjectId) -> Result<BoundingBox> {
        let object = self.get_object(id)?;
        Ok(self.bounds_of(&object.kind))
    }

    pub(crate) fn bounds_of(&self, kind: &ObjectKind) -> BoundingBox {
        match kind {
            ObjectKind::Group(group) => self.group_bounds(group).0,
            ObjectKind::Shape(shape) => shape
                .mesh
                .and_then(|mesh| self.objects.get(mesh))
                .map_or(BoundingBox::EMPTY, |mesh| self.bounds_of(&mesh.kind)),
            ObjectKind::Mesh(mesh) => mesh
                .bounds
                .get()
                .unwrap_or_else(|| self.vertex_bounds(&mesh.bounds, mesh.vertices)),
            ObjectKind::Plot(plot) => plot
                .bounds
                .get()
                .unwrap_or_else(|| self.vertex_bounds(&plot.bounds, plot.vertices)),
            _ => BoundingBox::EMPTY,
        }
    }

    /// Returns `(transformed, untransformed)` bounds of a group, recomputing
    /// and storing both when the cache is stale.
    pub(crate) fn group_bounds(&self, group: &Group) -> (BoundingBox, BoundingBox) {
        if let (Some(bbox), Some(untransformed)) =
            (group.bounds.get(), group.bounds.untransformed())
        {
            return (bbox, untransformed);
        }

        let mut untransformed = BoundingBox::EMPTY;
        for &child in &group.children {
            if let Some(object) = self.objects.get(child) {
                untransformed.expand_by(&self.bounds_of(&object.kind));
            }
        }
        let bbox = group
            .kind
            .matrix()
            .map_or(untransformed, |matrix| untransformed.transform(&matrix));

        group.bounds.store(bbox, untransformed);
        (bbox, untransformed)
    }

    fn vertex_bounds(
        &self,
        cache: &BoundsCache,
        vertices: Option<ObjectId>,
    ) -> BoundingBox {
        let bbox = vertices
            .and_then(|id| self.objects.get(id))
            .and_then(|object| match &object.kind {
                ObjectKind::Array(array) => array.as_vec3(),
                _ => None,
            })
            .map_or(BoundingBox::EMPTY, |points| {
                BoundingBox::from_points(points.iter().copied())
            });
        cache.store(bbox, bbox);
        bbox
    }

    // ========================================================================
    // Element enumeration
    // ========================================================================

    /// Children of a group or populated slots of a typed leaf.
    pub fn elements(&self, id: ObjectId) -> Result<Elements> {
        Ok(self.get_object(id)?.elements())
    }

    pub fn num_elements(&self, id: ObjectId) -> Result<usize> {
        Ok(self.elements(id)?.len())
    }

    pub fn element(&self, id: ObjectId, index: usize) -> Result<Option<ObjectId>> {
        Ok(self.elements(id)?.get(index).copied())
    }

    // ========================================================================
    // Lifetime
    // ========================================================================

    /// Removes an unowned object from the arena.
    ///
    /// Each element loses the registration the destroyed object held on it;
    /// elements left without owners are destroyed in turn. Returns the
    /// number of objects removed.
    ///
    /// # Errors
    /// [`GraphError::StillOwned`] if `id` still has owners.
    pub fn destroy(&mut self, id: ObjectId) -> Result<usize> {
        let owners = self.owner_count(id)?;
        if owners > 0 {
            return Err(GraphError::StillOwned { id, owners });
        }

        let mut removed = 0;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(object) = self.objects.remove(current) else {
                continue;
            };
            removed += 1;
            for element in object.elements() {
                if matches!(self.remove_owner(element, current), Ok(true))
                    && self.objects.get(element).is_some_and(|e| e.owners.is_empty())
                {
                    pending.push(element);
                }
            }
        }

        log::debug!("Destroyed {removed} object(s) starting at {id:?}");
        Ok(removed)
    }
}
