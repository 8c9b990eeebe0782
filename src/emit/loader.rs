//! Runtime loader helpers emitted into the declaration.
//!
//! The generated code keeps loaded assets in a holder object owned by the
//! caller. Nothing in the generated module mutates `Assets` on import;
//! `installLoadBundle` exists only when requested and must be called
//! explicitly.

use crate::ident::property_name;

use super::options::DeclarationOptions;

/// Render the loader helper block, or `None` when disabled.
pub fn render_loader(options: &DeclarationOptions) -> Option<String> {
    let load = options.create_load_function.as_ref()?;

    let type_name = &options.type_name;
    let holder = format!("{}Holder", type_name);
    let field = property_name(&options.object_name);
    let access = property_access(&options.object_name);

    let mut out = String::new();
    out.push_str(&format!(
        "\nexport type {holder} = {{ {field}: Partial<{type_name}> }};\n"
    ));
    out.push_str(&format!(
        "
export function resetAssets(holder: {holder}, result: Record<string, any>): {holder} {{
    holder{access} = {{ ...holder{access}, ...Object.assign({{}}, ...Object.values(result)) }};
    return holder;
}}
"
    ));
    out.push_str(&format!(
        "
export function createLoadBundle(loader: typeof Assets.loadBundle = Assets.loadBundle.bind(Assets)) {{
    const holder: {holder} = {{ {field}: {{}} }};
    async function loadBundle(bundleIds: ArrayOr<string>, onProgress?: ProgressCallback): Promise<any> {{
        const result = await loader(bundleIds, onProgress);
        resetAssets(holder, result);
        return result;
    }}
    return {{ holder, loadBundle }};
}}
"
    ));

    if load.change_pixi_assets {
        out.push_str(
            "
export function installLoadBundle(target: { loadBundle: typeof Assets.loadBundle } = Assets) {
    const flow = createLoadBundle(target.loadBundle.bind(target));
    target.loadBundle = flow.loadBundle as typeof target.loadBundle;
    return flow;
}
",
        );
    }

    Some(out)
}

fn property_access(name: &str) -> String {
    let rendered = property_name(name);
    if rendered == name {
        format!(".{}", name)
    } else {
        format!("[{}]", rendered)
    }
}
