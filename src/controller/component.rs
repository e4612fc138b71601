//! The primary [`Component`] of the controller, [`Interactor`].

use std::{sync::Arc, time::Duration};

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::{prelude::*, DMat4, DQuat, DVec2, DVec3};
use bevy_reflect::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    channel::{AnimationChannel, ARRIVAL_EPSILON},
    limits::{shortest_direction, Limits},
    options::{InteractorOptions, SceneBounds},
    rail::RailPath,
    rotation::{angle_between, euler_pair, slerp, trackball_rotation},
    state::{Action, CameraState, InteractorKind, RotationModel, StateFields},
    tour::Tour,
};

/// Pan speed is the camera distance, kept inside these bounds so panning stays usable both up
/// close and far away.
pub const PAN_SPEED_LIMITS: [f64; 2] = [0.05, 1.5];

/// Radius of the virtual trackball, in normalized pointer coordinates.
pub const TRACKBALL_RADIUS: f64 = 1.0;

/// A callback receiving a camera state snapshot.
pub type StateListener = Arc<dyn Fn(&CameraState) + Send + Sync>;

/// Observers notified by an [`Interactor`]. Injected at construction with
/// [`Interactor::with_update_listener`] and [`Interactor::with_arrival_listener`].
#[derive(Clone, Default)]
pub struct InteractorListeners {
    /// Invoked with the current state every time the view matrix is recomputed.
    pub on_update: Option<StateListener>,
    /// Invoked with the final state once per finished animation.
    pub on_arrival: Option<StateListener>,
}

impl std::fmt::Debug for InteractorListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let describe = |listener: &Option<StateListener>| {
            if listener.is_some() {
                "Some(<function>)"
            } else {
                "None"
            }
        };
        f.debug_struct("InteractorListeners")
            .field("on_update", &describe(&self.on_update))
            .field("on_arrival", &describe(&self.on_arrival))
            .finish()
    }
}

/// Sent by [`Interactor::update_camera_transforms`] when a camera finishes an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct InteractorArrived {
    /// The camera that arrived.
    pub camera: Entity,
}

/// Bounds of every field, resolved from [`InteractorOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct FieldLimits {
    /// `None` when the turn is free to spin.
    phi: Option<Limits>,
    theta: Limits,
    distance: Limits,
    pan: [Limits; 3],
}

impl FieldLimits {
    fn from_options(options: &InteractorOptions) -> Self {
        let defaults = InteractorOptions::default();
        Self {
            phi: (!Limits::is_free_spin_degrees(options.min_max_phi))
                .then(|| Limits::new(options.min_max_phi, defaults.min_max_phi)),
            theta: Limits::new(options.min_max_theta, defaults.min_max_theta),
            distance: Limits::new(options.min_max_dist, defaults.min_max_dist),
            pan: [
                Limits::new(options.min_max_pan_x, defaults.min_max_pan_x),
                Limits::new(options.min_max_pan_y, defaults.min_max_pan_y),
                Limits::new(options.min_max_pan_z, defaults.min_max_pan_z),
            ],
        }
    }
}

/// A complete pose, angles in degrees, every field clamped.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct Pose {
    phi: f64,
    theta: f64,
    distance: f64,
    pan: DVec3,
    orientation: DQuat,
    path_offset: f64,
}

/// Progress of a trackball rotation animation. Rotation is interpolated as a whole along the
/// shortest arc, never per component.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct OrientationAnimation {
    start: DQuat,
    target: DQuat,
    /// Fraction of the way from `start` to `target`, only ever increasing.
    stage: f64,
    /// Stage per second.
    rate: f64,
}

/// Turns pointer drags and "go to" requests into the view matrix of a camera.
///
/// One type covers every navigation metaphor; the [`InteractorKind`] chosen at construction
/// decides which degrees of freedom exist (see [`InteractorKind::capabilities`]). Every kind
/// follows the same contract:
///
/// - Exactly one thing moves the camera at a time: either the user, through
///   [`Interactor::track`], or an animation, started with [`Interactor::animate_to_state`] or
///   [`Interactor::resume_tour`]. Tracking cancels a running animation on the spot, without a jump.
/// - Every bounded field is inside its configured [`Limits`] after any call.
/// - The view matrix is only recomputed when something changed, and is read with
///   [`Interactor::matrix`].
///
/// # Moving the Camera
///
/// The [`DefaultInputPlugin`](crate::input::DefaultInputPlugin) sends mouse input to every
/// interactor automatically. To move the camera manually:
///
/// 1. Start a drag with [`Interactor::begin_drag`], choosing the [`Action`].
/// 2. While the drag is active, send pointer samples with [`Interactor::track`]. The first sample
///    of a drag only records the pointer position.
/// 3. End the drag with `begin_drag(Action::None)`.
///
/// To animate, call [`Interactor::animate_to_state`] and advance time with [`Interactor::tick`]
/// once per frame. [`Interactor::update_camera_transforms`] does this for you when the
/// [`MinimalInteractorPlugin`](crate::controller::MinimalInteractorPlugin) is added.
#[derive(Debug, Clone, Reflect, Component)]
#[reflect(Component)]
pub struct Interactor {
    kind: InteractorKind,
    options: InteractorOptions,
    limits: FieldLimits,
    path: RailPath,
    tour: Tour,
    phi: AnimationChannel,
    theta: AnimationChannel,
    distance: AnimationChannel,
    pan: [AnimationChannel; 3],
    path_offset: AnimationChannel,
    orientation: DQuat,
    orientation_animation: Option<OrientationAnimation>,
    /// Exact pose to land on when the running animation arrives.
    pending: Option<Pose>,
    animating: bool,
    leg_duration: f64,
    arrivals: u32,
    action: Action,
    new_drag: bool,
    last_pointer: DVec3,
    scene: SceneBounds,
    matrix: DMat4,
    dirty: bool,
    transform_stale: bool,
    #[reflect(ignore)]
    listeners: InteractorListeners,
}

impl Default for Interactor {
    fn default() -> Self {
        Self::new(InteractorKind::default(), InteractorOptions::default())
    }
}

impl Interactor {
    /// Create an interactor of the given kind. Options are used as given; malformed bounds are
    /// repaired rather than rejected.
    pub fn new(kind: InteractorKind, options: InteractorOptions) -> Self {
        let limits = FieldLimits::from_options(&options);
        let path = RailPath::new(&options.path_points, options.path_circular);
        let tour = Tour::new(options.path_states.clone(), options.path_circular);
        let mut interactor = Self {
            kind,
            options,
            limits,
            path,
            tour,
            phi: AnimationChannel::default(),
            theta: AnimationChannel::default(),
            distance: AnimationChannel::default(),
            pan: [AnimationChannel::default(); 3],
            path_offset: AnimationChannel::default(),
            orientation: DQuat::IDENTITY,
            orientation_animation: None,
            pending: None,
            animating: false,
            leg_duration: 0.0,
            arrivals: 0,
            action: Action::None,
            new_drag: true,
            last_pointer: DVec3::ZERO,
            scene: SceneBounds::default(),
            matrix: DMat4::IDENTITY,
            dirty: true,
            transform_stale: true,
            listeners: InteractorListeners::default(),
        };
        interactor.land(interactor.start_pose());
        interactor
    }

    /// A turntable: turn, tilt and zoom about the scene center.
    pub fn turntable(options: InteractorOptions) -> Self {
        Self::new(InteractorKind::Turntable, options)
    }

    /// A turntable that can also pan.
    pub fn turntable_pan(options: InteractorOptions) -> Self {
        Self::new(InteractorKind::TurntablePan, options)
    }

    /// A free trackball with pan and zoom.
    pub fn sphere(options: InteractorOptions) -> Self {
        Self::new(InteractorKind::Sphere, options)
    }

    /// A camera travelling along [`InteractorOptions::path_points`].
    pub fn rail(options: InteractorOptions) -> Self {
        Self::new(InteractorKind::Rail, options)
    }

    /// Call `listener` with the current state every time the view matrix is recomputed.
    #[must_use = "with_update_listener returns a modified Interactor"]
    pub fn with_update_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&CameraState) + Send + Sync + 'static,
    {
        self.listeners.on_update = Some(Arc::new(listener));
        self
    }

    /// Call `listener` with the final state each time an animation arrives.
    #[must_use = "with_arrival_listener returns a modified Interactor"]
    pub fn with_arrival_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&CameraState) + Send + Sync + 'static,
    {
        self.listeners.on_arrival = Some(Arc::new(listener));
        self
    }

    /// The navigation metaphor of this interactor.
    pub fn kind(&self) -> InteractorKind {
        self.kind
    }

    /// The options this interactor was created with.
    pub fn options(&self) -> &InteractorOptions {
        &self.options
    }

    /// The rail path. Empty for interactors created without path points.
    pub fn path(&self) -> &RailPath {
        &self.path
    }

    /// The waypoint tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// The action pointer samples are currently interpreted as.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Is an animation running?
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Is the camera walking through its tour on its own?
    pub fn is_touring(&self) -> bool {
        self.tour.is_walking()
    }

    /// Duration of the running animation leg, from its start to its arrival.
    pub fn animation_duration(&self) -> Option<Duration> {
        if !self.animating {
            return None;
        }
        Duration::try_from_secs_f64(self.leg_duration).ok()
    }

    /// The scene bounds used for the last matrix.
    pub fn scene_bounds(&self) -> SceneBounds {
        self.scene
    }

    /// Update the scene bounds. The matrix is recomputed on next access if they changed.
    pub fn set_scene_bounds(&mut self, bounds: SceneBounds) {
        if bounds != self.scene {
            self.scene = bounds;
            self.dirty = true;
        }
    }

    /// A snapshot of the current state, angles in degrees.
    pub fn state(&self) -> CameraState {
        let phi = self.phi.current;
        let theta = self.theta.current;
        let distance = self.distance.current;
        match self.kind {
            InteractorKind::Turntable => CameraState::Turntable {
                phi,
                theta,
                distance,
            },
            InteractorKind::TurntablePan => CameraState::TurntablePan {
                phi,
                theta,
                pan: self.pan_vec(),
                distance,
            },
            InteractorKind::Sphere => CameraState::Sphere {
                orientation: self.orientation,
                pan: self.pan_vec(),
                distance,
            },
            InteractorKind::Rail => CameraState::Rail {
                phi,
                theta,
                path_offset: self.path.normalize_offset(self.path_offset.current),
            },
        }
    }

    /// Build a state of this interactor's kind from the flat array notation of
    /// [`CameraState::components`]. Missing entries keep their current values.
    pub fn state_from_components(&self, values: &[f64]) -> CameraState {
        self.state().with_components(values)
    }

    /// Jump to `state`, clamped into bounds. Cancels any animation and tour, and recomputes the
    /// matrix immediately.
    ///
    /// A state of another kind is applied field by field: fields this interactor has are taken,
    /// others ignored. A sphere given turn and tilt angles builds its orientation from them.
    pub fn set_state(&mut self, state: CameraState) {
        self.interrupt();
        let pose = self.resolve(state.fields());
        self.land(pose);
        self.matrix();
    }

    /// Restore the start state from the options, cancel everything, and rewind the tour.
    pub fn reset(&mut self) {
        self.stop_animation();
        self.tour.rewind();
        self.action = Action::None;
        self.new_drag = true;
        self.land(self.start_pose());
    }

    /// Animate to `target`, clamped into bounds, cancelling any running animation or tour.
    ///
    /// All fields arrive at the same time. With no `duration`, the configured
    /// [`InteractorOptions::animation_time`] is used, or else the time the slowest field would
    /// need at its nominal speed, kept within the configured minimum and maximum. A free spinning
    /// turn goes the short way round.
    pub fn animate_to_state(&mut self, target: CameraState, duration: Option<Duration>) {
        self.tour.pause();
        self.start_leg(target.fields(), duration);
    }

    /// Walk to the next waypoint of the tour and keep walking through the rest on arrival.
    ///
    /// After the last waypoint of an open tour the walk stops and the tour rewinds, so the next
    /// call starts again from the first waypoint. Returns `false` if there are no waypoints.
    pub fn resume_tour(&mut self) -> bool {
        let Some(waypoint) = self.tour.resume().cloned() else {
            return false;
        };
        debug!(
            "Tour heading to waypoint {} \"{}\"",
            self.tour.index(),
            waypoint.name
        );
        self.start_leg(waypoint.state.fields(), waypoint.duration);
        true
    }

    /// Advance the running animation by `delta_time`. Returns `true` if the camera moved, `false`
    /// when there is nothing to animate.
    ///
    /// A zero `delta_time` makes no progress, the animation stays pending.
    pub fn tick(&mut self, delta_time: Duration) -> bool {
        if !self.animating {
            return false;
        }
        let dt = delta_time.as_secs_f64();

        let mut arrived = true;
        for (channel, _) in self.active_channels() {
            arrived &= channel.advance(dt);
        }
        if let Some(animation) = &mut self.orientation_animation {
            animation.stage = (animation.stage + animation.rate * dt).min(1.0);
            self.orientation = slerp(animation.start, animation.target, animation.stage);
            arrived &= animation.stage >= 1.0 - ARRIVAL_EPSILON;
        }
        self.dirty = true;

        if arrived {
            self.arrive();
        }
        true
    }

    /// Choose how the following pointer samples are interpreted. Returns `true` if this starts a
    /// new drag, in which case the next sample only records the pointer position.
    pub fn begin_drag(&mut self, action: Action) -> bool {
        if action == self.action {
            return false;
        }
        trace!("{:?} camera drag: {:?} -> {action:?}", self.kind, self.action);
        self.action = action;
        self.new_drag = true;
        true
    }

    /// Consume one pointer sample and return this interactor's matrix applied to `matrix`.
    ///
    /// `x` and `y` are the pointer position in normalized device coordinates (`-1..1`, y up). `z`
    /// is the zoom factor used by [`Action::Scale`]: below one zooms in, or steps forward on a
    /// rail. Rotation and pan follow the pointer's movement since the previous sample; the first
    /// sample of a drag only records the position. Any motion cancels a running animation, unless
    /// [`InteractorOptions::animation_locked`] is set, in which case samples are ignored until it
    /// arrives.
    pub fn track(&mut self, matrix: DMat4, x: f64, y: f64, z: f64) -> DMat4 {
        let pointer = DVec3::new(x, y, z);
        if (self.options.animation_locked && self.animating) || !pointer.is_finite() {
            return self.matrix() * matrix;
        }
        if self.new_drag {
            self.last_pointer = pointer;
            self.new_drag = false;
        }
        let previous = self.last_pointer.truncate();
        let current = pointer.truncate();
        self.last_pointer = pointer;

        let capabilities = self.kind.capabilities();
        match self.action {
            Action::None => (),
            Action::Rotate => {
                self.interrupt();
                self.rotate(previous, current);
            }
            // Without lateral freedom there is nothing to pan, and nothing to interrupt.
            Action::Pan if capabilities.has_pan => {
                self.interrupt();
                self.pan_by(current - previous);
            }
            Action::Pan => (),
            Action::Scale => self.scale_by(z),
        }
        trace!("{:?} camera tracked {:?} at ({x}, {y}, {z})", self.kind, self.action);
        self.matrix() * matrix
    }

    /// Move one step forward along the rail path. Does nothing on other kinds or empty paths.
    pub fn step_forward(&mut self) {
        self.step_along_path(self.options.step_length);
    }

    /// Move one step backward along the rail path. Does nothing on other kinds or empty paths.
    pub fn step_backward(&mut self) {
        self.step_along_path(-self.options.step_length);
    }

    /// The camera position on the rail path in normalized scene space, sampled with the current
    /// scene bounds. `None` for other kinds and empty paths.
    pub fn rail_position(&self) -> Option<DVec3> {
        if self.kind != InteractorKind::Rail {
            return None;
        }
        let offset = self.path.normalize_offset(self.path_offset.current);
        let point = self
            .path
            .sample_transformed(offset, self.options.path_transform.as_ref())?;
        Some(self.scene.normalize_point(point))
    }

    /// The view matrix, mapping world space into camera space. Recomputed only if the state or
    /// the scene bounds changed since the last call.
    pub fn matrix(&mut self) -> DMat4 {
        if self.dirty {
            self.matrix = self.compute_matrix();
            self.dirty = false;
            self.transform_stale = true;
            if let Some(listener) = &self.listeners.on_update {
                listener(&self.state());
            }
        }
        self.matrix
    }

    /// The camera [`Transform`] in world space matching [`Interactor::matrix`].
    pub fn camera_transform(&mut self) -> Transform {
        let (_, rotation, translation) = self.matrix().inverse().to_scale_rotation_translation();
        Transform {
            translation: translation.as_vec3(),
            rotation: rotation.as_quat().normalize(),
            scale: Vec3::ONE,
        }
    }

    /// The camera [`Transform`], if it changed since the last time this was called.
    pub fn take_transform(&mut self) -> Option<Transform> {
        self.matrix();
        std::mem::take(&mut self.transform_stale).then(|| self.camera_transform())
    }

    /// Number of animations that arrived since the last call.
    pub fn take_arrivals(&mut self) -> u32 {
        std::mem::take(&mut self.arrivals)
    }

    /// Tick every interactor, write camera transforms, and report arrivals. Called once per frame.
    pub fn update_camera_transforms(
        mut cameras: Query<(Entity, &mut Interactor, &mut Transform)>,
        bounds: Option<Res<SceneBounds>>,
        time: Res<Time>,
        mut arrived: EventWriter<InteractorArrived>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        let bounds = bounds.map(|bounds| *bounds).unwrap_or_default();
        for (camera, mut interactor, mut transform) in cameras.iter_mut() {
            interactor.set_scene_bounds(bounds);
            let moving = interactor.tick(time.delta());
            for _ in 0..interactor.take_arrivals() {
                arrived.send(InteractorArrived { camera });
            }
            if let Some(new_transform) = interactor.take_transform() {
                *transform = new_transform;
                redraw.send(RequestRedraw);
            } else if moving {
                redraw.send(RequestRedraw);
            }
        }
    }

    fn start_pose(&self) -> Pose {
        let options = &self.options;
        let phi = self.clamp_phi(options.start_phi);
        let theta = self.limits.theta.clamp(options.start_theta);
        Pose {
            phi,
            theta,
            distance: self.limits.distance.clamp(options.start_distance),
            pan: self.clamp_pan(options.start_pan),
            orientation: euler_pair(phi.to_radians(), theta.to_radians()),
            path_offset: self.path.normalize_offset(options.start_path_offset),
        }
    }

    /// Fill `fields` from the current state and clamp everything into bounds.
    fn resolve(&self, fields: StateFields) -> Pose {
        let finite = |value: &f64| value.is_finite();
        let phi = fields
            .phi
            .filter(finite)
            .map(|phi| self.clamp_phi(phi))
            .unwrap_or(self.phi.current);
        let theta = fields
            .theta
            .filter(finite)
            .map(|theta| self.limits.theta.clamp(theta))
            .unwrap_or(self.theta.current);
        let distance = fields
            .distance
            .filter(finite)
            .map(|distance| self.limits.distance.clamp(distance))
            .unwrap_or(self.distance.current);
        let pan = fields
            .pan
            .filter(|pan| pan.is_finite())
            .map(|pan| self.clamp_pan(pan))
            .unwrap_or(self.pan_vec());
        let orientation = match fields.orientation {
            Some(q) if q.is_finite() && (q.length_squared() - 1.0).abs() <= 1e-12 => q,
            Some(q) if q.is_finite() && q.length_squared() > f64::EPSILON => q.normalize(),
            _ if fields.phi.is_some() || fields.theta.is_some() => {
                euler_pair(phi.to_radians(), theta.to_radians())
            }
            _ => self.orientation,
        };
        let path_offset = fields
            .path_offset
            .filter(finite)
            .map(|offset| self.path.normalize_offset(offset))
            .unwrap_or(self.path.normalize_offset(self.path_offset.current));
        Pose {
            phi,
            theta,
            distance,
            pan,
            orientation,
            path_offset,
        }
    }

    /// Put every field exactly at `pose`.
    fn land(&mut self, pose: Pose) {
        self.phi.set(pose.phi);
        self.theta.set(pose.theta);
        self.distance.set(pose.distance);
        for (channel, value) in self.pan.iter_mut().zip(pose.pan.to_array()) {
            channel.set(value);
        }
        self.orientation = pose.orientation;
        self.path_offset.set(pose.path_offset);
        self.dirty = true;
    }

    fn start_leg(&mut self, fields: StateFields, duration: Option<Duration>) {
        let pose = self.resolve(fields);
        self.stop_animation();

        if self.limits.phi.is_none() {
            // Both ends are normalized, so a turn parked far outside [0, 360) still takes the short
            // way. Moving the current angle by whole turns leaves the view untouched.
            let (current, target) = shortest_direction(self.phi.current, pose.phi, 360.0);
            self.phi.set(current);
            self.phi.target = target;
        } else {
            self.phi.target = pose.phi;
        }
        self.theta.target = pose.theta;
        self.distance.target = pose.distance;
        for (channel, value) in self.pan.iter_mut().zip(pose.pan.to_array()) {
            channel.target = value;
        }
        if self.path.is_circular() {
            let (current, target) =
                shortest_direction(self.path_offset.current, pose.path_offset, 1.0);
            self.path_offset.set(current);
            self.path_offset.target = target;
        } else {
            self.path_offset.target = pose.path_offset;
        }

        let speeds = self.options.speeds;
        let mut slowest = self
            .active_channels()
            .into_iter()
            .map(|(channel, speed)| channel.time_at(speed))
            .fold(0.0, f64::max);
        if self.kind.capabilities().rotation == RotationModel::Quaternion {
            let animation = OrientationAnimation {
                start: self.orientation,
                target: pose.orientation,
                stage: 0.0,
                rate: 0.0,
            };
            if speeds.angular > 0.0 {
                let angle = angle_between(animation.start, animation.target).to_degrees();
                slowest = slowest.max(angle / speeds.angular);
            }
            self.orientation_animation = Some(animation);
        }

        let duration = match duration.or(self.options.animation_time) {
            Some(duration) => duration.as_secs_f64(),
            None => {
                let min = self.options.min_duration.as_secs_f64();
                let max = self.options.max_duration.as_secs_f64();
                slowest.clamp(min.min(max), max.max(min))
            }
        };
        for (channel, _) in self.active_channels() {
            channel.sync_to(duration);
        }
        if let Some(animation) = &mut self.orientation_animation {
            animation.rate = if duration > 0.0 {
                duration.recip()
            } else {
                f64::MAX
            };
        }

        debug!(
            "{:?} camera animating over {duration:.3}s (slowest field alone: {slowest:.3}s)",
            self.kind
        );
        self.pending = Some(pose);
        self.leg_duration = duration;
        self.animating = true;
    }

    fn arrive(&mut self) {
        self.animating = false;
        self.orientation_animation = None;
        if let Some(pose) = self.pending.take() {
            self.land(pose);
        }
        self.arrivals += 1;
        debug!("{:?} camera arrived", self.kind);
        if let Some(listener) = &self.listeners.on_arrival {
            listener(&self.state());
        }
        if let Some(next) = self.tour.arrive().cloned() {
            debug!(
                "Tour continuing to waypoint {} \"{}\"",
                self.tour.index(),
                next.name
            );
            self.start_leg(next.state.fields(), next.duration);
        }
    }

    /// Stop the running animation where it is.
    fn stop_animation(&mut self) {
        if !self.animating {
            return;
        }
        for (channel, _) in self.active_channels() {
            channel.cancel();
        }
        let offset = self.path.normalize_offset(self.path_offset.current);
        self.path_offset.set(offset);
        self.orientation_animation = None;
        self.pending = None;
        self.animating = false;
        self.dirty = true;
        debug!("{:?} camera animation cancelled", self.kind);
    }

    /// User input takes over: stop animating and stop touring.
    fn interrupt(&mut self) {
        self.stop_animation();
        self.tour.pause();
    }

    /// The channels animated for this kind, with the nominal speed of each.
    fn active_channels(&mut self) -> Vec<(&mut AnimationChannel, f64)> {
        let capabilities = self.kind.capabilities();
        let speeds = self.options.speeds;
        let mut channels = Vec::with_capacity(6);
        if capabilities.rotation != RotationModel::Quaternion {
            channels.push((&mut self.phi, speeds.angular));
            channels.push((&mut self.theta, speeds.angular));
        }
        if capabilities.has_zoom {
            channels.push((&mut self.distance, speeds.distance));
        }
        if capabilities.has_pan {
            for channel in &mut self.pan {
                channels.push((channel, speeds.pan));
            }
        }
        if capabilities.rotation == RotationModel::PathOffset {
            channels.push((&mut self.path_offset, speeds.path));
        }
        channels
    }

    fn rotate(&mut self, previous: DVec2, current: DVec2) {
        match self.kind.capabilities().rotation {
            RotationModel::Quaternion => {
                if let Some(rotation) = trackball_rotation(previous, current, TRACKBALL_RADIUS) {
                    self.orientation = (rotation * self.orientation).normalize();
                }
            }
            RotationModel::EulerPair | RotationModel::PathOffset => {
                let delta = current - previous;
                let phi = self.clamp_phi(self.phi.current + delta.x.to_degrees());
                let theta = self
                    .limits
                    .theta
                    .clamp(self.theta.current + delta.y.to_degrees());
                self.phi.set(phi);
                self.theta.set(theta);
            }
        }
        self.dirty = true;
    }

    /// Pan along the camera's local axes, at a speed proportional to the distance.
    fn pan_by(&mut self, delta: DVec2) {
        let [low, high] = PAN_SPEED_LIMITS;
        let speed = self.distance.current.clamp(low, high);
        let local = delta.extend(0.0) * speed;
        let world = self.rotation().inverse() * local;
        let pan = self.clamp_pan(self.pan_vec() - world);
        for (channel, value) in self.pan.iter_mut().zip(pan.to_array()) {
            channel.set(value);
        }
        self.dirty = true;
    }

    fn scale_by(&mut self, factor: f64) {
        if !(factor > 0.0 && factor.is_finite()) {
            return;
        }
        let capabilities = self.kind.capabilities();
        if capabilities.has_zoom {
            self.interrupt();
            let distance = self.limits.distance.clamp(self.distance.current * factor);
            self.distance.set(distance);
            self.dirty = true;
        } else if capabilities.rotation == RotationModel::PathOffset && !self.options.path_locked {
            if factor < 1.0 {
                self.step_forward();
            } else {
                self.step_backward();
            }
        }
    }

    fn step_along_path(&mut self, step: f64) {
        if self.kind != InteractorKind::Rail || self.path.is_empty() {
            return;
        }
        self.interrupt();
        let offset = self.path.step(self.path_offset.current, step);
        self.path_offset.set(offset);
        self.dirty = true;
    }

    fn compute_matrix(&self) -> DMat4 {
        let normalization = self.scene.normalization();
        let rotation = DMat4::from_quat(self.rotation());
        let zoom = DMat4::from_translation(DVec3::new(0.0, 0.0, -self.distance.current));
        let pan = DMat4::from_translation(-self.pan_vec());
        match self.kind {
            InteractorKind::Turntable => zoom * rotation * normalization,
            InteractorKind::TurntablePan | InteractorKind::Sphere => {
                zoom * rotation * pan * normalization
            }
            InteractorKind::Rail => {
                let position = self.rail_position().unwrap_or(DVec3::ZERO);
                rotation * DMat4::from_translation(-position) * normalization
            }
        }
    }

    /// Orientation of the scene relative to the camera.
    fn rotation(&self) -> DQuat {
        match self.kind.capabilities().rotation {
            RotationModel::Quaternion => self.orientation,
            RotationModel::EulerPair | RotationModel::PathOffset => {
                euler_pair(self.phi.current.to_radians(), self.theta.current.to_radians())
            }
        }
    }

    fn pan_vec(&self) -> DVec3 {
        DVec3::new(self.pan[0].current, self.pan[1].current, self.pan[2].current)
    }

    fn clamp_phi(&self, phi: f64) -> f64 {
        match self.limits.phi {
            Some(limits) => limits.clamp(phi),
            // A free turn has no bound to fall back on.
            None if !phi.is_finite() => 0.0,
            None => phi,
        }
    }

    fn clamp_pan(&self, pan: DVec3) -> DVec3 {
        DVec3::new(
            self.limits.pan[0].clamp(pan.x),
            self.limits.pan[1].clamp(pan.y),
            self.limits.pan[2].clamp(pan.z),
        )
    }
}
