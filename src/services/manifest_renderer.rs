//! IMS 清单渲染服务 - 业务能力层
//!
//! 只负责"资源列表 → imsmanifest.xml"能力，资源顺序与传入顺序一致。

use std::fmt::Write;

use uuid::Uuid;

use crate::models::RenderedResource;

const IMSCP_NS: &str = "http://www.imsglobal.org/xsd/imscp_v1p1";
const IMSMD_NS: &str = "http://www.imsglobal.org/xsd/imsmd_v1p2";
const IMSQTI_NS: &str = "http://www.imsglobal.org/xsd/imsqti_v2p1";

/// QTI 2.1 题目资源类型
const QTI_ITEM_RESOURCE_TYPE: &str = "imsqti_item_xmlv2p1";

/// imsmanifest.xml 渲染器
pub struct ManifestRenderer;

impl ManifestRenderer {
    /// 创建渲染器
    pub fn new() -> Self {
        Self
    }

    /// 渲染内容包清单
    ///
    /// # 参数
    /// - `resources`: 已渲染题目的登记项，顺序即清单中的顺序
    pub fn render(&self, resources: &[RenderedResource]) -> String {
        let manifest_id = format!("MANIFEST-{}", Uuid::new_v4().simple());

        let mut xml = String::new();
        let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(xml, r#"<manifest xmlns="{IMSCP_NS}""#);
        let _ = writeln!(xml, r#"          xmlns:imsmd="{IMSMD_NS}""#);
        let _ = writeln!(xml, r#"          xmlns:imsqti="{IMSQTI_NS}""#);
        let _ = writeln!(xml, r#"          identifier="{manifest_id}" version="1.0">"#);
        let _ = writeln!(xml, r#"  <metadata>"#);
        let _ = writeln!(xml, r#"    <schema>IMS Content</schema>"#);
        let _ = writeln!(xml, r#"    <schemaversion>1.1.3</schemaversion>"#);
        let _ = writeln!(xml, r#"    <imsmd:lom>"#);
        let _ = writeln!(xml, r#"      <imsmd:general>"#);
        let _ = writeln!(xml, r#"        <imsmd:title>"#);
        let _ = writeln!(
            xml,
            r#"          <imsmd:langstring xml:lang="zh">Aiken2QTI 试题包</imsmd:langstring>"#
        );
        let _ = writeln!(xml, r#"        </imsmd:title>"#);
        let _ = writeln!(xml, r#"      </imsmd:general>"#);
        let _ = writeln!(xml, r#"    </imsmd:lom>"#);
        let _ = writeln!(xml, r#"  </metadata>"#);
        let _ = writeln!(xml, r#"  <organizations />"#);
        let _ = writeln!(xml, r#"  <resources>"#);
        for resource in resources {
            let _ = writeln!(
                xml,
                r#"    <resource identifier="RES-{}" type="{}" href="{}">"#,
                xml_escape(&resource.identifier),
                QTI_ITEM_RESOURCE_TYPE,
                xml_escape(&resource.filename)
            );
            let _ = writeln!(
                xml,
                r#"      <file href="{}" />"#,
                xml_escape(&resource.filename)
            );
            let _ = writeln!(xml, r#"    </resource>"#);
        }
        let _ = writeln!(xml, r#"  </resources>"#);
        let _ = writeln!(xml, r#"</manifest>"#);
        xml
    }
}

impl Default for ManifestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 转义 XML 属性值
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
