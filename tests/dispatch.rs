extern crate gltex;

use gltex::context::workarounds;
use gltex::context::{ContextOptions, DetectedDrivers};
use gltex::texture::dispatch::*;

use support::Profile;

mod support;

#[test]
fn classic_context() {
    let (context, _) = support::build_context(Profile::classic());
    let dispatch = context.get_dispatch();

    assert_eq!(dispatch.create, CreatePath::Reserve);
    assert_eq!(dispatch.bind, BindPath::Classic);
    assert_eq!(dispatch.unbind, UnbindPath::Classic);
    assert_eq!(dispatch.bind_multi, MultiPath::Fallback);
    assert_eq!(dispatch.parameter, AccessPath::Classic);
    assert_eq!(dispatch.storage, StoragePath::Fallback);
    assert_eq!(dispatch.get_image, GetImagePath::Classic);
    assert_eq!(dispatch.invalidate, InvalidatePath::NoOp);
    assert_eq!(dispatch.max_anisotropy, AnisotropyPath::NoOp);
    assert_eq!(dispatch.label, LabelPath::NoOp);
    assert!(dispatch.used_extensions().is_empty());
    assert!(context.get_driver_workarounds().is_empty());
}

#[test]
fn modern_context() {
    let (context, _) = support::build_context(Profile::modern());
    let dispatch = context.get_dispatch();

    assert_eq!(dispatch.create, CreatePath::Create);
    assert_eq!(dispatch.bind, BindPath::Dsa);
    assert_eq!(dispatch.unbind, UnbindPath::Dsa);
    assert_eq!(dispatch.bind_multi, MultiPath::Multi);
    assert_eq!(dispatch.bind_images, MultiPath::Multi);
    assert_eq!(dispatch.parameter, AccessPath::Dsa);
    assert_eq!(dispatch.storage, StoragePath::Immutable(AccessPath::Dsa));
    assert_eq!(dispatch.sub_image_3d, UploadPath::Direct(AccessPath::Dsa));
    assert_eq!(dispatch.get_image, GetImagePath::Dsa);
    assert_eq!(dispatch.invalidate, InvalidatePath::Arb);
    assert_eq!(dispatch.max_anisotropy, AnisotropyPath::ArbOrExt);
    assert_eq!(dispatch.label, LabelPath::Khr);
    assert_eq!(dispatch.cube_sub_image_3d, CubeUploadPath::Dsa);
    assert_eq!(dispatch.cube_image, CubeFaceReadPath::Dsa);
    assert!(dispatch.used_extensions().contains(&"GL_ARB_direct_state_access"));
    assert!(dispatch.used_extensions().contains(&"GL_ARB_multi_bind"));
}

#[test]
fn ext_direct_state_access() {
    let profile = Profile::classic().extensions(&["GL_EXT_direct_state_access",
                                                  "GL_ARB_texture_storage"]);
    let (context, _) = support::build_context(profile);
    let dispatch = context.get_dispatch();

    assert_eq!(dispatch.create, CreatePath::Reserve);
    assert_eq!(dispatch.bind, BindPath::DsaExt);
    assert_eq!(dispatch.parameter, AccessPath::DsaExt);
    assert_eq!(dispatch.storage, StoragePath::Immutable(AccessPath::DsaExt));
    assert_eq!(dispatch.get_image, GetImagePath::DsaExt);

    // no EXT variant for the faces
    assert_eq!(dispatch.cube_sub_image, AccessPath::Classic);
    assert_eq!(dispatch.cube_sub_image_3d, CubeUploadPath::SliceBySlice);
}

#[test]
fn robustness_before_ext_dsa_for_reads() {
    let profile = Profile::classic().extensions(&["GL_EXT_direct_state_access",
                                                  "GL_ARB_robustness"]);
    let (context, _) = support::build_context(profile);

    assert_eq!(context.get_dispatch().get_image, GetImagePath::Robustness);
    assert_eq!(context.get_dispatch().get_compressed_image, GetImagePath::Robustness);
    assert_eq!(context.get_dispatch().cube_image, CubeFaceReadPath::Robustness);
}

#[test]
fn extensions_listed_by_old_contexts() {
    let profile = Profile::classic().extensions(&["GL_ARB_multi_bind", "GL_KHR_debug"]);
    let (context, _) = support::build_context(profile);

    assert!(context.get_extensions().gl_arb_multi_bind);
    assert!(context.get_extensions().gl_khr_debug);
    assert_eq!(context.get_dispatch().bind, BindPath::Multi);
    assert_eq!(context.get_dispatch().label, LabelPath::Khr);
}

#[test]
fn disabled_extension() {
    let options = ContextOptions::default().disable_extension("GL_ARB_direct_state_access");
    let (context, _) = support::build_context_with(Profile::modern(), options);
    let dispatch = context.get_dispatch();

    assert!(!context.get_extensions().gl_arb_direct_state_access);
    assert_eq!(dispatch.create, CreatePath::Reserve);
    assert_eq!(dispatch.bind, BindPath::Multi);
    assert_eq!(dispatch.parameter, AccessPath::Classic);
    assert!(!dispatch.used_extensions().contains(&"GL_ARB_direct_state_access"));
}

#[test]
fn amd_cube_maps() {
    let profile = Profile::modern().vendor("ATI Technologies Inc.", "AMD Radeon RX 580");
    let (context, _) = support::build_context(profile);
    let dispatch = context.get_dispatch();

    assert_eq!(context.get_detected_drivers(), DetectedDrivers::AMD);
    assert_eq!(context.get_driver_workarounds(),
               &[workarounds::AMD_WINDOWS_CUBEMAP_IMAGE3D_SLICE_BY_SLICE]);
    assert_eq!(dispatch.cube_sub_image, AccessPath::Classic);
    assert_eq!(dispatch.cube_sub_image_3d, CubeUploadPath::SliceBySlice);
    assert_eq!(dispatch.cube_image_3d, CubeReadPath::DsaSliceBySlice);
    assert_eq!(dispatch.cube_level_parameter, AccessPath::Dsa);
    assert_eq!(dispatch.bind, BindPath::Dsa);
}

#[test]
fn amd_without_dsa_needs_nothing() {
    let profile = Profile::classic().vendor("ATI Technologies Inc.", "AMD Radeon RX 580");
    let (context, _) = support::build_context(profile);

    assert!(context.get_driver_workarounds().is_empty());
}

#[test]
fn svga3d_slices() {
    let profile = Profile::with_version("4.1 (Core Profile) Mesa 22.3.6")
        .vendor("VMware, Inc.", "SVGA3D; build: RELEASE");
    let (context, _) = support::build_context(profile);
    let dispatch = context.get_dispatch();

    assert_eq!(context.get_detected_drivers(), DetectedDrivers::MESA | DetectedDrivers::SVGA3D);
    assert_eq!(dispatch.image, ImagePath::SliceBySlice);
    assert_eq!(dispatch.sub_image_2d, UploadPath::SliceBySlice(AccessPath::Classic));
    assert_eq!(dispatch.sub_image_3d, UploadPath::SliceBySlice(AccessPath::Classic));
    assert_eq!(dispatch.cube_sub_image_3d, CubeUploadPath::SliceBySlice);
}

#[test]
fn svga3d_with_dsa() {
    let profile = Profile::with_version("4.5 (Core Profile) Mesa 22.3.6")
        .vendor("VMware, Inc.", "SVGA3D; build: RELEASE");
    let (context, _) = support::build_context(profile);

    assert_eq!(context.get_dispatch().sub_image_3d, UploadPath::SliceBySlice(AccessPath::Dsa));
    assert_eq!(context.get_dispatch().cube_sub_image_3d, CubeUploadPath::DsaSliceBySlice);
}

#[test]
fn plain_mesa_is_left_alone() {
    let profile = Profile::with_version("4.5 (Core Profile) Mesa 23.0.4")
        .vendor("Mesa", "llvmpipe (LLVM 15.0.7, 256 bits)");
    let (context, _) = support::build_context(profile);

    assert_eq!(context.get_detected_drivers(), DetectedDrivers::MESA);
    assert_eq!(context.get_dispatch().sub_image_3d, UploadPath::Direct(AccessPath::Dsa));
}

#[test]
fn nvidia() {
    let profile = Profile::modern().vendor("NVIDIA Corporation", "NVIDIA GeForce RTX 3070");
    let (context, _) = support::build_context(profile);
    let dispatch = context.get_dispatch();

    assert_eq!(dispatch.compressed_block_data_size, BlockDataSizePath::Bits);
    assert_eq!(dispatch.cube_compressed_image_size, CubeCompressedSizePath::DsaImmutableWorkaround);
    assert_eq!(dispatch.cube_compressed_image_3d, CubeReadPath::DsaSliceBySlice);
    assert_eq!(dispatch.cube_image_3d, CubeReadPath::Dsa);
    assert_eq!(context.get_driver_workarounds().len(), 3);
}

#[test]
fn nvidia_without_dsa() {
    let profile = Profile::classic().vendor("NVIDIA Corporation", "GeForce 7600 GS");
    let (context, _) = support::build_context(profile);
    let dispatch = context.get_dispatch();

    assert_eq!(dispatch.cube_compressed_image_size,
               CubeCompressedSizePath::ClassicImmutableWorkaround);
    assert_eq!(dispatch.cube_compressed_image_3d, CubeReadPath::SliceBySlice);
    assert_eq!(context.get_driver_workarounds(),
               &[workarounds::NV_COMPRESSED_BLOCK_SIZE_IN_BITS,
                 workarounds::NV_CUBEMAP_INCONSISTENT_COMPRESSED_IMAGE_SIZE]);
}

#[test]
fn disabled_workaround() {
    let profile = Profile::modern().vendor("NVIDIA Corporation", "NVIDIA GeForce RTX 3070");
    let options = ContextOptions::default()
        .disable_workaround(workarounds::NV_COMPRESSED_BLOCK_SIZE_IN_BITS)
        .disable_workaround("no-such-workaround");
    let (context, _) = support::build_context_with(profile, options);

    assert_eq!(context.get_dispatch().compressed_block_data_size, BlockDataSizePath::Bytes);
    assert!(!context.get_driver_workarounds()
                    .contains(&workarounds::NV_COMPRESSED_BLOCK_SIZE_IN_BITS));
    assert_eq!(context.get_driver_workarounds().len(), 2);
}
