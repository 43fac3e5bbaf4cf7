//! Material Graph and Taxonomy Tests
//!
//! Tests for:
//! - SingleBxdf / MultiBxdf: per-tag input sets, retagging re-registration
//! - Snapshot iterators: filter correctness, immunity to later mutation
//! - MaterialStore / TextureStore: non-owning handles, stale resolution
//! - graph module: cycle-tolerant traversal, texture gathering, dirty
//!   scan, mark_compiled handshake

use glam::Vec4;

use shadegraph::{
    AnyMaterial, BxdfType, CombineMode, InputTypes, MaterialStore, MultiBxdf, SingleBxdf,
    TextureStore, graph,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Mix combinator with both children plugged in, as a compiler would see it.
fn mix_of(store: &mut MaterialStore, base: BxdfType, top: BxdfType) -> shadegraph::MaterialHandle {
    let base = store.add(SingleBxdf::new(base));
    let top = store.add(SingleBxdf::new(top));

    let mut mix = MultiBxdf::new(CombineMode::Mix);
    mix.set_input("base", base).expect("material accepted");
    mix.set_input("top", top).expect("material accepted");
    mix.set_input("weight", Vec4::splat(0.5)).expect("vector accepted");
    store.add(mix)
}

// ============================================================================
// Taxonomy Tests
// ============================================================================

#[test]
fn lambert_registers_albedo_and_normal() {
    let material = SingleBxdf::new(BxdfType::Lambert);
    assert_eq!(material.bxdf_type(), BxdfType::Lambert);
    assert!(material.has_input("albedo"));
    assert!(material.has_input("normal"));
    assert_eq!(material.input_count(), 2);

    let albedo = material.input_info("albedo").expect("registered");
    assert_eq!(albedo.supported, InputTypes::VECTOR4 | InputTypes::TEXTURE);
    let normal = material.input_info("normal").expect("registered");
    assert_eq!(normal.supported, InputTypes::TEXTURE);
}

#[test]
fn microfacet_kinds_register_roughness() {
    for bxdf in [
        BxdfType::MicrofacetBlinn,
        BxdfType::MicrofacetBeckmann,
        BxdfType::MicrofacetGGX,
    ] {
        let material = SingleBxdf::new(bxdf);
        assert!(material.has_input("roughness"), "{bxdf:?} needs roughness");
        assert!(material.has_input("fresnel"), "{bxdf:?} needs fresnel");
    }
    for bxdf in [
        BxdfType::MicrofacetRefractionGGX,
        BxdfType::MicrofacetRefractionBeckmann,
        BxdfType::IdealRefract,
    ] {
        let material = SingleBxdf::new(bxdf);
        assert!(material.has_input("ior"), "{bxdf:?} needs ior");
    }
}

#[test]
fn zero_and_passthrough_take_no_parameters() {
    assert_eq!(SingleBxdf::new(BxdfType::Zero).input_count(), 0);
    assert_eq!(SingleBxdf::new(BxdfType::Passthrough).input_count(), 0);
}

#[test]
fn retagging_replaces_input_set() {
    let mut material = SingleBxdf::new(BxdfType::Lambert);
    material.set_input("albedo", Vec4::ONE).expect("vector accepted");
    material.set_dirty(false);

    material.set_bxdf_type(BxdfType::MicrofacetGGX);
    assert_eq!(material.bxdf_type(), BxdfType::MicrofacetGGX);
    assert!(material.has_input("roughness"));
    assert!(material.is_dirty(), "Retagging invalidates compiled state");

    // Re-registration discards previously assigned values.
    assert!(material.input_value("albedo").is_err());
}

#[test]
fn retagging_to_same_tag_is_a_no_op() {
    let mut material = SingleBxdf::new(BxdfType::Lambert);
    material.set_input("albedo", Vec4::ONE).expect("vector accepted");

    material.set_bxdf_type(BxdfType::Lambert);
    assert!(
        material.input_value("albedo").is_ok(),
        "Same-tag retag must not wipe assigned values"
    );
}

#[test]
fn combinators_register_expected_inputs() {
    let mix = MultiBxdf::new(CombineMode::Mix);
    assert!(mix.has_input("base"));
    assert!(mix.has_input("top"));
    assert!(mix.has_input("weight"));

    for mode in [CombineMode::Layered, CombineMode::FresnelBlend] {
        let material = MultiBxdf::new(mode);
        assert!(material.has_input("base"), "{mode:?} needs base");
        assert!(material.has_input("top"), "{mode:?} needs top");
        assert!(material.has_input("ior"), "{mode:?} needs ior");
    }
}

#[test]
fn combinator_retag_swaps_blend_control() {
    let mut material = MultiBxdf::new(CombineMode::Mix);
    material.set_combine_mode(CombineMode::FresnelBlend);
    assert_eq!(material.combine_mode(), CombineMode::FresnelBlend);
    assert!(!material.has_input("weight"));
    assert!(material.has_input("ior"));
}

// ============================================================================
// Iterator Tests
// ============================================================================

#[test]
fn mix_material_iterators_partition_by_kind() {
    // Scenario C
    let mut store = MaterialStore::new();
    let base = store.add(SingleBxdf::new(BxdfType::Lambert));
    let top = store.add(SingleBxdf::new(BxdfType::MicrofacetGGX));

    let mut mix = MultiBxdf::new(CombineMode::Mix);
    mix.set_input("base", base).expect("material accepted");
    mix.set_input("top", top).expect("material accepted");
    mix.set_input("weight", Vec4::splat(0.25)).expect("vector accepted");

    let materials: Vec<_> = mix.materials().collect();
    assert_eq!(materials, vec![base, top], "Name order: base before top");
    assert_eq!(mix.textures().len(), 0);
    assert_eq!(mix.inputs().len(), 3);
}

#[test]
fn texture_iterator_matches_input_filter() {
    // P5: textures() is exactly the TextureRef subset of inputs()
    let mut textures = TextureStore::<()>::new();
    let albedo_map = textures.add(());
    let normal_map = textures.add(());

    let mut material = SingleBxdf::new(BxdfType::MicrofacetGGX);
    material.set_input("albedo", albedo_map).expect("texture accepted");
    material.set_input("normal", normal_map).expect("texture accepted");
    material.set_input("roughness", Vec4::splat(0.4)).expect("vector accepted");

    let filtered: Vec<_> = material
        .inputs()
        .filter_map(|input| input.value.and_then(|v| v.as_texture()))
        .collect();
    let yielded: Vec<_> = material.textures().collect();
    assert_eq!(yielded, filtered);
    assert_eq!(yielded, vec![albedo_map, normal_map], "Name order: albedo before normal");
}

#[test]
fn unset_inputs_are_iterated_but_filtered_from_refs() {
    let material = MultiBxdf::new(CombineMode::Mix);
    assert_eq!(material.inputs().len(), 3);
    assert_eq!(material.materials().len(), 0, "Unset children are not graph edges");
}

#[test]
fn iterators_snapshot_state_at_creation() {
    // P4
    let mut material = SingleBxdf::new(BxdfType::Lambert);
    material.set_input("albedo", Vec4::ONE).expect("vector accepted");

    let snapshot = material.inputs();
    material.set_input("albedo", Vec4::ZERO).expect("vector accepted");

    let albedo = snapshot
        .into_iter()
        .find(|input| input.info.name == "albedo")
        .expect("albedo is registered");
    assert_eq!(
        albedo.value.and_then(|v| v.as_vector4()),
        Some(Vec4::ONE),
        "Mutation after creation must not leak into an existing iterator"
    );
}

// ============================================================================
// Store Tests
// ============================================================================

#[test]
fn store_handles_are_non_owning() {
    let mut store = MaterialStore::new();
    let child = store.add(SingleBxdf::new(BxdfType::Lambert));

    let mut parent = MultiBxdf::new(CombineMode::Mix);
    parent.set_input("base", child).expect("material accepted");
    let parent = store.add(parent);

    // Removing the child does not cascade; the parent keeps a stale edge.
    store.remove(child).expect("child was present");
    assert!(!store.contains(child));

    let parent_ref = store.get(parent).expect("parent still present");
    let edges: Vec<_> = parent_ref.materials().collect();
    assert_eq!(edges, vec![child], "The stale handle is stored as-is");
    assert!(store.get(child).is_none(), "Stale handles resolve to None");
}

#[test]
fn store_dispatches_over_taxonomy() {
    let mut store = MaterialStore::new();
    let single = store.add(SingleBxdf::new(BxdfType::Emissive));
    let multi = store.add(MultiBxdf::new(CombineMode::Layered));
    assert_eq!(store.len(), 2);

    match store.get(single).expect("present") {
        AnyMaterial::Single(m) => assert_eq!(m.bxdf_type(), BxdfType::Emissive),
        AnyMaterial::Multi(_) => panic!("expected a SingleBxdf"),
    }
    assert!(store.get(multi).expect("present").as_multi().is_some());
}

// ============================================================================
// Graph Traversal Tests
// ============================================================================

#[test]
fn dependencies_visit_depth_first_root_first() {
    init_logger();
    let mut store = MaterialStore::new();
    let root = mix_of(&mut store, BxdfType::Lambert, BxdfType::MicrofacetGGX);

    let order = graph::dependencies(&store, root);
    assert_eq!(order.len(), 3);
    assert_eq!(order[0], root, "Root comes first");

    let root_children: Vec<_> = store.get(root).expect("present").materials().collect();
    assert_eq!(&order[1..], &root_children[..], "Children in input name order");
}

#[test]
fn dependencies_terminate_on_cycles() {
    init_logger();
    let mut store = MaterialStore::new();
    let a = store.add(MultiBxdf::new(CombineMode::Mix));
    let b = store.add(MultiBxdf::new(CombineMode::Mix));

    store.get_mut(a).expect("present").set_input("base", b).expect("material accepted");
    store.get_mut(b).expect("present").set_input("base", a).expect("material accepted");

    let order = graph::dependencies(&store, a);
    assert_eq!(order, vec![a, b], "Each node exactly once despite the cycle");
}

#[test]
fn dependencies_skip_dangling_edges() {
    init_logger();
    let mut store = MaterialStore::new();
    let ghost = store.add(SingleBxdf::new(BxdfType::Lambert));
    store.remove(ghost).expect("ghost was present");

    let mut root = MultiBxdf::new(CombineMode::Mix);
    root.set_input("base", ghost).expect("material accepted");
    let root = store.add(root);

    let order = graph::dependencies(&store, root);
    assert_eq!(order, vec![root], "Missing targets are skipped, not fatal");
}

#[test]
fn collect_textures_deduplicates_across_graph() {
    init_logger();
    let mut textures = TextureStore::<()>::new();
    let shared_map = textures.add(());

    let mut store = MaterialStore::new();
    let mut base = SingleBxdf::new(BxdfType::Lambert);
    base.set_input("albedo", shared_map).expect("texture accepted");
    let base = store.add(base);

    let mut top = SingleBxdf::new(BxdfType::MicrofacetGGX);
    top.set_input("albedo", shared_map).expect("texture accepted");
    let top = store.add(top);

    let mut mix = MultiBxdf::new(CombineMode::Mix);
    mix.set_input("base", base).expect("material accepted");
    mix.set_input("top", top).expect("material accepted");
    let root = store.add(mix);

    assert_eq!(
        graph::collect_textures(&store, root),
        vec![shared_map],
        "A texture referenced twice is gathered once"
    );
}

#[test]
fn dirty_scan_and_mark_compiled_handshake() {
    init_logger();
    let mut store = MaterialStore::new();
    let root = mix_of(&mut store, BxdfType::Lambert, BxdfType::Emissive);

    // Fresh graph: everything is dirty.
    assert!(graph::any_dirty(&store, root));

    // Compiler resynchronizes through shared references only.
    graph::mark_compiled(&store, root);
    assert!(!graph::any_dirty(&store, root));

    // Touching one child makes the graph dirty again, without propagation.
    let child = graph::dependencies(&store, root)[1];
    store
        .get_mut(child)
        .expect("present")
        .set_input("albedo", Vec4::ONE)
        .expect("vector accepted");
    assert!(graph::any_dirty(&store, root));
    assert!(
        !store.get(root).expect("present").is_dirty(),
        "Dirtiness does not propagate to parents on its own"
    );
}
