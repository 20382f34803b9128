extern crate gltex;
extern crate rand;

use std::collections::HashMap;

use gltex::context::DISENGAGED_BINDING;
use gltex::gl;
use gltex::texture::{self, ObjectFlags, RawTexture, TextureTarget};
use gltex::texture::dispatch::BindPath;
use gltex::GlObject;
use rand::{Rng, SeedableRng};

use support::{bindings, Call, Profile};

mod support;

fn owned() -> ObjectFlags {
    ObjectFlags::DELETE_ON_DESTRUCTION | ObjectFlags::CREATED
}

#[test]
fn bind_on_fresh_unit() {
    let (context, log) = support::build_context(Profile::modern());
    assert_eq!(context.texture_state().query(3), (0, DISENGAGED_BINDING));

    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    a.bind(3);

    assert_eq!(log.take(), vec![Call::BindTextureUnit(3, 5)]);
    assert_eq!(context.texture_state().query(3), (gl::TEXTURE_2D, 5));
}

#[test]
fn second_bind_is_elided() {
    let (context, log) = support::build_context(Profile::modern());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());

    a.bind(3);
    log.take();
    a.bind(3);

    assert!(log.take().is_empty());
    assert_eq!(context.texture_state().query(3), (gl::TEXTURE_2D, 5));
}

#[test]
fn other_texture_replaces() {
    let (context, log) = support::build_context(Profile::modern());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    let b = RawTexture::from_id(&context, TextureTarget::Texture3d, 9, owned());

    a.bind(3);
    a.bind(3);
    log.take();
    b.bind(3);

    assert_eq!(log.take(), vec![Call::BindTextureUnit(3, 9)]);
    assert_eq!(context.texture_state().query(3), (gl::TEXTURE_3D, 9));
}

#[test]
fn destroy_scrubs_all_aliases() {
    let (context, log) = support::build_context(Profile::modern());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    let b = RawTexture::from_id(&context, TextureTarget::Texture3d, 9, owned());

    a.bind(3);
    b.bind(3);
    a.bind(6);
    log.take();

    drop(a);
    assert_eq!(log.take(), vec![Call::DeleteTexture(5)]);
    assert_eq!(context.texture_state().query(3), (gl::TEXTURE_3D, 9));
    assert_eq!(context.texture_state().query(6).1, DISENGAGED_BINDING);

    // the driver hands out the same name again
    let c = RawTexture::new(&context, TextureTarget::Texture2d);
    assert_eq!(c.get_id(), 5);
    log.take();

    c.bind(6);
    assert_eq!(log.take(), vec![Call::BindTextureUnit(6, 5)]);
}

#[test]
fn reset_forces_rebind() {
    let (context, log) = support::build_context(Profile::modern());
    let b = RawTexture::from_id(&context, TextureTarget::Texture2d, 9, owned());

    b.bind(3);
    log.take();

    context.reset_texture_state();
    assert!(log.take().is_empty());
    assert!((0 .. 8).all(|u| context.texture_state().query(u) == (0, DISENGAGED_BINDING)));

    b.bind(3);
    assert_eq!(log.take(), vec![Call::BindTextureUnit(3, 9)]);
}

#[test]
fn direct_state_access_is_preferred() {
    let profile = Profile::with_version("3.3.0 Test")
        .extensions(&["GL_ARB_direct_state_access", "GL_ARB_multi_bind",
                      "GL_EXT_direct_state_access"]);
    let (context, log) = support::build_context(profile);
    assert_eq!(context.get_dispatch().bind, BindPath::Dsa);

    let a = RawTexture::new(&context, TextureTarget::Texture2d);
    log.take();
    a.bind(2);

    assert_eq!(log.take(), vec![Call::BindTextureUnit(2, a.get_id())]);
    assert_eq!(context.texture_state().active_texture, None);
}

#[test]
fn classic_bind_activates_once() {
    let (context, log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    let b = RawTexture::from_id(&context, TextureTarget::Texture2d, 6, owned());

    a.bind(1);
    b.bind(1);
    a.bind(2);

    assert_eq!(log.take(), vec![
        Call::ActiveTexture(1),
        Call::BindTexture(gl::TEXTURE_2D, 5),
        Call::BindTexture(gl::TEXTURE_2D, 6),
        Call::ActiveTexture(2),
        Call::BindTexture(gl::TEXTURE_2D, 5),
    ]);
    assert_eq!(context.texture_state().active_texture, Some(2));
}

#[test]
fn ext_dsa_bind_doesnt_activate() {
    let profile = Profile::classic().extensions(&["GL_EXT_direct_state_access"]);
    let (context, log) = support::build_context(profile);
    let a = RawTexture::new(&context, TextureTarget::Texture3d);
    log.take();

    a.bind(4);
    assert_eq!(log.take(), vec![Call::BindMultiTexture(4, gl::TEXTURE_3D, a.get_id())]);
    assert_eq!(context.texture_state().active_texture, None);
}

#[test]
fn no_cross_unit_interference() {
    let (context, _log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());

    let before: Vec<_> = (0 .. 8).map(|u| context.texture_state().query(u)).collect();
    a.bind(4);

    for unit in 0 .. 8 {
        if unit == 4 {
            assert_eq!(context.texture_state().query(unit), (gl::TEXTURE_2D, 5));
        } else {
            assert_eq!(context.texture_state().query(unit), before[unit as usize]);
        }
    }
}

#[test]
fn moved_handle_keeps_bindings() {
    let (context, log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    a.bind(2);
    log.take();

    let moved = Box::new(a);
    moved.bind(2);
    assert!(log.take().is_empty());

    let handles = vec![*moved];
    handles[0].bind(2);
    assert!(log.take().is_empty());
}

#[test]
fn unbind_is_elided_when_empty() {
    let (context, log) = support::build_context(Profile::modern());
    let a = RawTexture::new(&context, TextureTarget::Texture2d);
    a.bind(1);
    log.take();

    texture::unbind(&context, 1);
    texture::unbind(&context, 1);

    assert_eq!(log.take(), vec![Call::BindTextureUnit(1, 0)]);
    assert_eq!(context.texture_state().query(1), (0, 0));
}

#[test]
fn classic_unbind_uses_cached_target() {
    let (context, log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::CubeMap, 5, owned());
    a.bind(1);
    log.take();

    texture::unbind(&context, 1);
    assert_eq!(log.take(), vec![Call::BindTexture(gl::TEXTURE_CUBE_MAP, 0)]);
}

fn unbind_every_classic_target() -> Vec<Call> {
    vec![
        Call::BindTexture(gl::TEXTURE_1D, 0),
        Call::BindTexture(gl::TEXTURE_2D, 0),
        Call::BindTexture(gl::TEXTURE_3D, 0),
        Call::BindTexture(gl::TEXTURE_CUBE_MAP, 0),
    ]
}

#[test]
fn classic_unbind_of_unknown_unit_empties_every_target() {
    let (context, log) = support::build_context(Profile::classic());

    texture::unbind(&context, 3);

    let mut expected = vec![Call::ActiveTexture(3)];
    expected.extend(unbind_every_classic_target());
    assert_eq!(log.take(), expected);
    assert_eq!(context.texture_state().query(3), (0, 0));

    texture::unbind(&context, 3);
    assert!(log.take().is_empty());
}

#[test]
fn classic_unbind_after_reset() {
    let (context, log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    a.bind(3);
    context.reset_texture_state();
    log.take();

    // whatever was bound before the reset may still be there
    texture::unbind(&context, 3);

    let mut expected = vec![Call::ActiveTexture(3)];
    expected.extend(unbind_every_classic_target());
    assert_eq!(log.take(), expected);
    assert_eq!(context.texture_state().query(3), (0, 0));

    a.bind(3);
    assert_eq!(log.take(), vec![Call::BindTexture(gl::TEXTURE_2D, 5)]);
}

#[test]
fn ext_dsa_unbind_of_unknown_unit() {
    let profile = Profile::with_version("3.3.0 Test").extensions(&["GL_EXT_direct_state_access"]);
    let (context, log) = support::build_context(profile);

    texture::unbind(&context, 2);

    let calls = log.take();
    assert!(calls.iter().all(|call| matches!(call, Call::BindMultiTexture(2, _, 0))));
    assert!(calls.contains(&Call::BindMultiTexture(2, gl::TEXTURE_RECTANGLE, 0)));
    assert!(calls.contains(&Call::BindMultiTexture(2, gl::TEXTURE_2D_MULTISAMPLE_ARRAY, 0)));
    assert!(!calls.contains(&Call::BindMultiTexture(2, gl::TEXTURE_CUBE_MAP_ARRAY, 0)));
    assert_eq!(context.texture_state().query(2), (0, 0));
}

#[test]
fn unbind_after_destroy_keeps_target() {
    let (context, log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::Texture3d, 5, owned());
    a.bind(2);
    drop(a);
    log.take();

    // the name is gone but something may still be bound to the unit
    texture::unbind(&context, 2);
    assert_eq!(log.take(), vec![Call::BindTexture(gl::TEXTURE_3D, 0)]);
}

#[test]
#[should_panic]
fn bind_out_of_range() {
    let (context, _log) = support::build_context(Profile::modern());
    let a = RawTexture::new(&context, TextureTarget::Texture2d);
    a.bind(8);
}

#[test]
fn bind_multi_issues_one_call() {
    let (context, log) = support::build_context(Profile::modern());
    let a = RawTexture::new(&context, TextureTarget::Texture2d);
    let b = RawTexture::new(&context, TextureTarget::Texture3d);
    log.take();

    texture::bind_multi(&context, 2, &[Some(&a), None, Some(&b)]);
    assert_eq!(log.take(), vec![Call::BindTextures(2, vec![a.get_id(), 0, b.get_id()])]);
    assert_eq!(context.texture_state().query(2), (gl::TEXTURE_2D, a.get_id()));
    assert_eq!(context.texture_state().query(3), (0, 0));
    assert_eq!(context.texture_state().query(4), (gl::TEXTURE_3D, b.get_id()));

    texture::bind_multi(&context, 2, &[Some(&a), None, Some(&b)]);
    assert!(log.take().is_empty());

    // one unit differs, the whole range goes again
    texture::bind_multi(&context, 2, &[Some(&b), None, Some(&b)]);
    assert_eq!(log.take(), vec![Call::BindTextures(2, vec![b.get_id(), 0, b.get_id()])]);
}

#[test]
fn bind_multi_creates_before_comparing() {
    let profile = Profile::classic().extensions(&["GL_ARB_multi_bind"]);
    let (context, log) = support::build_context(profile);
    let a = RawTexture::new(&context, TextureTarget::Texture2d);
    log.take();

    texture::bind_multi(&context, 7, &[Some(&a)]);

    // creation goes through the internal unit, which is unit 7
    assert_eq!(log.take(), vec![Call::ActiveTexture(7), Call::BindTexture(gl::TEXTURE_2D, 1)]);
    assert_eq!(context.texture_state().query(7), (gl::TEXTURE_2D, 1));
}

#[test]
fn bind_multi_fallback() {
    let (context, log) = support::build_context(Profile::classic());
    let a = RawTexture::from_id(&context, TextureTarget::Texture2d, 5, owned());
    a.bind(1);
    log.take();

    texture::bind_multi(&context, 0, &[Some(&a), Some(&a)]);
    assert_eq!(log.take(), vec![Call::ActiveTexture(0), Call::BindTexture(gl::TEXTURE_2D, 5)]);

    texture::unbind_range(&context, 0, 2);
    assert_eq!(log.take(), vec![
        Call::BindTexture(gl::TEXTURE_2D, 0),
        Call::ActiveTexture(1),
        Call::BindTexture(gl::TEXTURE_2D, 0),
    ]);
}

#[test]
#[should_panic]
fn bind_multi_out_of_range() {
    let (context, _log) = support::build_context(Profile::modern());
    texture::unbind_range(&context, 6, 3);
}

#[test]
#[should_panic]
fn bind_multi_other_context() {
    let (first, _) = support::build_context(Profile::modern());
    let (second, _) = support::build_context(Profile::modern());
    let a = RawTexture::new(&first, TextureTarget::Texture2d);
    texture::bind_multi(&second, 0, &[Some(&a)]);
}

/// Compares random bind and unbind sequences with a model of the units.
fn check_against_model(profile: Profile, seed: u64) {
    let (context, log) = support::build_context(profile);

    let targets = [TextureTarget::Texture2d, TextureTarget::Texture3d, TextureTarget::CubeMap];
    let textures: Vec<_> = (0 .. 6).map(|i| {
        RawTexture::new(&context, targets[i % targets.len()])
    }).collect();
    for texture in &textures {
        texture.create_if_not_already();
    }
    context.reset_texture_state();
    log.take();

    // `None` is a disengaged unit
    let mut model: HashMap<u32, Option<(u32, u32)>> = (0 .. 7).map(|u| (u, None)).collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    for _ in 0 .. 500 {
        let unit = rng.gen_range(0 .. 7);
        let before = model[&unit];

        if rng.gen_bool(0.7) {
            let texture = &textures[rng.gen_range(0 .. textures.len())];
            texture.bind(unit);
            let target = match texture.get_target() {
                TextureTarget::Texture2d => gl::TEXTURE_2D,
                TextureTarget::Texture3d => gl::TEXTURE_3D,
                _ => gl::TEXTURE_CUBE_MAP,
            };
            if before.map(|(_, id)| id) != Some(texture.get_id()) {
                model.insert(unit, Some((target, texture.get_id())));
            }
        } else {
            texture::unbind(&context, unit);
            match before {
                Some((_, 0)) => (),
                Some((target, _)) => { model.insert(unit, Some((target, 0))); },
                None => { model.insert(unit, Some((0, 0))); },
            }
        }

        let calls = bindings(log.take());
        let changed = model[&unit].map(|(_, id)| id) != before.map(|(_, id)| id);
        assert_eq!(!calls.is_empty(), changed, "unit {}: {:?} -> {:?}, calls {:?}", unit,
                   before, model[&unit], calls);

        for (unit, expected) in &model {
            let (target, id) = context.texture_state().query(*unit);
            match expected {
                None => assert_eq!(id, DISENGAGED_BINDING),
                Some((_, 0)) => assert_eq!(id, 0),
                Some((expected_target, expected_id)) => {
                    assert_eq!((target, id), (*expected_target, *expected_id))
                },
            }
        }
    }
}

#[test]
fn random_sequences_classic() {
    check_against_model(Profile::classic(), 1);
    check_against_model(Profile::classic(), 2);
}

#[test]
fn random_sequences_ext_dsa() {
    check_against_model(Profile::classic().extensions(&["GL_EXT_direct_state_access"]), 3);
}

#[test]
fn random_sequences_multi_bind() {
    check_against_model(Profile::classic().extensions(&["GL_ARB_multi_bind"]), 4);
}

#[test]
fn random_sequences_dsa() {
    check_against_model(Profile::modern(), 5);
}
