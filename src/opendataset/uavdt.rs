//! UAVDT dataset loader
//!
//! Expected layout under the root path:
//!
//! ```text
//! <root>/
//!   UAV-benchmark-M/<sequence>/img000001.jpg ...
//!   M_attr/<sequence>_attr.txt
//!   UAV-benchmark-MOTD_v1.0/GT/<sequence>_gt.txt
//!   UAV-benchmark-MOTD_v1.0/GT/<sequence>_gt_whole.txt
//! ```
//!
//! Each sequence becomes one segment. The two ground truth files are paired
//! line by line; they must have the same line count and agree on frame and
//! target ids, otherwise the load aborts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{extract_frame_id, io_error, sorted_files_with_extension, sorted_subdirs};
use crate::dataset::label::Attributes;
use crate::dataset::{
    AttributeValue, Catalog, Classification, Data, Dataset, LabeledBox2d, Segment,
};
use crate::utils::LoaderError;

pub const DATASET_NAME: &str = "UAVDT";

const IMAGE_DIR: &str = "UAV-benchmark-M";
const ATTRIBUTE_DIR: &str = "M_attr";
const GROUND_TRUTH_DIR: &str = "UAV-benchmark-MOTD_v1.0/GT";
const IMAGE_EXTENSION: &str = "jpg";

const CATALOG_JSON: &str = include_str!("uavdt_catalog.json");

/// The catalog bundled with this loader
pub fn catalog() -> Result<Catalog, LoaderError> {
    Catalog::from_json(CATALOG_JSON)
}

/// One per-object annotation, resolved against the catalog
#[derive(Debug, Clone)]
struct GroundTruth {
    target_id: String,
    bbox_left: f64,
    bbox_top: f64,
    bbox_width: f64,
    bbox_height: f64,
    out_of_view: String,
    occlusion: String,
    category: String,
    score: f64,
}

/// Load UAVDT with the bundled catalog
pub fn load(root: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
    let catalog = catalog()?;
    load_with_catalog(root.as_ref(), &catalog)
}

/// Load UAVDT from `root` using an explicit catalog
pub fn load_with_catalog(root: &Path, catalog: &Catalog) -> Result<Dataset, LoaderError> {
    let image_root = root.join(IMAGE_DIR);

    let mut dataset = Dataset::new(DATASET_NAME);
    dataset.catalog = catalog.clone();

    for sequence_dir in sorted_subdirs(&image_root)? {
        let sequence = sequence_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(sequence = %sequence, "loading sequence");

        let attributes = parse_sequence_attributes(root, &sequence, catalog)?;
        let ground_truth = parse_ground_truth(root, &sequence, catalog)?;

        let segment = dataset.create_segment(&sequence);
        fill_segment(segment, &sequence_dir, &attributes, &ground_truth)?;
    }

    Ok(dataset)
}

/// Parse `<root>/M_attr/<sequence>_attr.txt`: one line of comma-separated
/// 0/1 flags, one per catalog-declared classification attribute.
fn parse_sequence_attributes(
    root: &Path,
    sequence: &str,
    catalog: &Catalog,
) -> Result<Attributes, LoaderError> {
    let declared = &catalog.classification()?.attributes;
    let path = root.join(ATTRIBUTE_DIR).join(format!("{}_attr.txt", sequence));
    let content = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;

    let line = content.lines().next().unwrap_or_default().trim();
    let values: Vec<&str> = line.split(',').collect();
    if values.len() != declared.len() {
        return Err(LoaderError::MalformedRecord {
            path: path.display().to_string(),
            line: 1,
            reason: format!(
                "expected {} attribute flags, found {}",
                declared.len(),
                values.len()
            ),
        });
    }

    let mut attributes = Attributes::new();
    for (info, value) in declared.iter().zip(values) {
        let flag = value.trim().parse::<u8>().map_err(|_| {
            LoaderError::MalformedRecord {
                path: path.display().to_string(),
                line: 1,
                reason: format!("attribute flag \"{}\" is not an integer", value),
            }
        })?;
        attributes.insert(info.name.clone(), AttributeValue::Bool(flag != 0));
    }
    Ok(attributes)
}

/// Parse the paired ground truth files into frame id -> records.
///
/// `<sequence>_gt.txt` carries the per-object confidence score,
/// `<sequence>_gt_whole.txt` the box geometry and enum codes. The files are
/// paired by line position; line counts and the frame/target ids of each
/// pair must agree.
fn parse_ground_truth(
    root: &Path,
    sequence: &str,
    catalog: &Catalog,
) -> Result<HashMap<u64, Vec<GroundTruth>>, LoaderError> {
    let box2d = catalog.box2d()?;
    let out_of_view = box2d.attribute("out_of_view")?;
    let occlusion = box2d.attribute("occlusion")?;

    let gt_dir = root.join(GROUND_TRUTH_DIR);
    let mot_path = gt_dir.join(format!("{}_gt.txt", sequence));
    let det_path = gt_dir.join(format!("{}_gt_whole.txt", sequence));

    let mot_content = fs::read_to_string(&mot_path).map_err(|e| io_error(&mot_path, e))?;
    let det_content = fs::read_to_string(&det_path).map_err(|e| io_error(&det_path, e))?;

    let mot_lines: Vec<&str> = mot_content.lines().collect();
    let det_lines: Vec<&str> = det_content.lines().collect();
    if mot_lines.len() != det_lines.len() {
        return Err(LoaderError::MisalignedGroundTruth {
            mot_path: mot_path.display().to_string(),
            mot_lines: mot_lines.len(),
            det_path: det_path.display().to_string(),
            det_lines: det_lines.len(),
        });
    }

    let malformed = |line: usize, reason: String| LoaderError::MalformedRecord {
        path: det_path.display().to_string(),
        line,
        reason,
    };

    let mut records: HashMap<u64, Vec<GroundTruth>> = HashMap::new();
    for (index, (mot_line, det_line)) in mot_lines.iter().zip(&det_lines).enumerate() {
        let line_number = index + 1;
        let mot: Vec<&str> = mot_line.trim().split(',').collect();
        let det: Vec<&str> = det_line.trim().split(',').collect();
        if det.len() < 9 {
            return Err(malformed(
                line_number,
                format!("expected 9 fields, found {}", det.len()),
            ));
        }
        if mot.len() < 7 {
            return Err(LoaderError::MalformedRecord {
                path: mot_path.display().to_string(),
                line: line_number,
                reason: format!("expected 7 fields, found {}", mot.len()),
            });
        }

        // The line pairing has no join key in the source layout; the ids
        // must match or the two files are out of step.
        if mot[0] != det[0] || mot[1] != det[1] {
            return Err(malformed(
                line_number,
                format!(
                    "frame/target id mismatch between ground truth files \
                     ({},{} vs {},{})",
                    mot[0], mot[1], det[0], det[1]
                ),
            ));
        }

        let parse_f64 = |field: &str, name: &str| {
            field
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed(line_number, format!("{} \"{}\" is not a number", name, field)))
        };
        let parse_code = |field: &str, name: &str| {
            field
                .trim()
                .parse::<usize>()
                .map_err(|_| malformed(line_number, format!("{} \"{}\" is not an integer", name, field)))
        };

        let frame_id = det[0].trim().parse::<u64>().map_err(|_| {
            malformed(line_number, format!("frame id \"{}\" is not an integer", det[0]))
        })?;

        let record = GroundTruth {
            target_id: det[1].trim().to_string(),
            bbox_left: parse_f64(det[2], "bbox_left")?,
            bbox_top: parse_f64(det[3], "bbox_top")?,
            bbox_width: parse_f64(det[4], "bbox_width")?,
            bbox_height: parse_f64(det[5], "bbox_height")?,
            out_of_view: out_of_view.resolve_enum(parse_code(det[6], "out_of_view code")?)?,
            occlusion: occlusion.resolve_enum(parse_code(det[7], "occlusion code")?)?,
            category: box2d
                .resolve_category(parse_code(det[8], "category code")?)?
                .to_string(),
            score: parse_f64(mot[6], "score")?,
        };
        records.entry(frame_id).or_default().push(record);
    }
    Ok(records)
}

/// Build one data item per image in the sequence directory, sorted by file
/// name, attaching the sequence classification and the frame's boxes.
fn fill_segment(
    segment: &mut Segment,
    sequence_dir: &Path,
    attributes: &Attributes,
    ground_truth: &HashMap<u64, Vec<GroundTruth>>,
) -> Result<(), LoaderError> {
    for image_path in sorted_files_with_extension(sequence_dir, IMAGE_EXTENSION)? {
        let image_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let frame_id = extract_frame_id(&image_name)
            .ok_or_else(|| LoaderError::MissingFrameId(image_name.clone()))?;

        let mut data = Data::new(image_path);
        data.label.classification = Some(Classification::with_attributes(attributes.clone()));
        if let Some(records) = ground_truth.get(&frame_id) {
            data.label.box2d = records.iter().map(to_box2d).collect();
        }
        segment.append(data);
    }
    Ok(())
}

fn to_box2d(record: &GroundTruth) -> LabeledBox2d {
    let mut box2d = LabeledBox2d::from_xywh(
        record.bbox_left,
        record.bbox_top,
        record.bbox_width,
        record.bbox_height,
    );
    box2d.category = Some(record.category.clone());
    box2d.instance = Some(record.target_id.clone());
    box2d
        .attributes
        .insert("out_of_view".to_string(), record.out_of_view.as_str().into());
    box2d
        .attributes
        .insert("occlusion".to_string(), record.occlusion.as_str().into());
    box2d
        .attributes
        .insert("score".to_string(), record.score.into());
    box2d
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    /// Root with one sequence, three images and two ground truth lines for
    /// frame 1, one for frame 2, none for frame 3.
    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        for image in ["img000001.jpg", "img000002.jpg", "img000003.jpg"] {
            write_file(&root.join(IMAGE_DIR).join("M0101").join(image), "");
        }
        // Non-image files are ignored by the extension glob
        write_file(&root.join(IMAGE_DIR).join("M0101").join("notes.txt"), "x");

        write_file(
            &root.join(ATTRIBUTE_DIR).join("M0101_attr.txt"),
            "1,0,0,1,0,0,1,0,0,0\n",
        );
        write_file(
            &root.join(GROUND_TRUTH_DIR).join("M0101_gt.txt"),
            "1,1,10,5,20,8,0.9\n1,2,1,2,3,4,0.5\n2,1,12,6,20,8,0.8\n",
        );
        write_file(
            &root.join(GROUND_TRUTH_DIR).join("M0101_gt_whole.txt"),
            "1,1,10,5,20,8,0,1,0\n1,2,1,2,3,4,1,0,2\n2,1,12,6,20,8,2,3,1\n",
        );
        temp
    }

    #[test]
    fn test_load_builds_one_data_per_image() {
        let temp = fixture();
        let dataset = load(temp.path()).unwrap();

        assert_eq!(dataset.name, DATASET_NAME);
        assert_eq!(dataset.segments().len(), 1);
        let segment = &dataset.segments()[0];
        assert_eq!(segment.name, "M0101");
        assert_eq!(segment.data().len(), 3);

        // Box count per image equals the ground truth lines for its frame id
        assert_eq!(segment.data()[0].label.box2d.len(), 2);
        assert_eq!(segment.data()[1].label.box2d.len(), 1);
        assert_eq!(segment.data()[2].label.box2d.len(), 0);
    }

    #[test]
    fn test_box_corners_and_attributes() {
        let temp = fixture();
        let dataset = load(temp.path()).unwrap();
        let first = &dataset.segments()[0].data()[0];

        let box2d = &first.label.box2d[0];
        assert_eq!(box2d.xmin, 10.0);
        assert_eq!(box2d.ymin, 5.0);
        assert_eq!(box2d.xmax, 30.0);
        assert_eq!(box2d.ymax, 13.0);
        assert_eq!(box2d.category.as_deref(), Some("car"));
        assert_eq!(box2d.instance.as_deref(), Some("1"));
        assert_eq!(
            box2d.attributes.get("occlusion"),
            Some(&AttributeValue::Str("large-occ".to_string()))
        );
        assert_eq!(
            box2d.attributes.get("out_of_view"),
            Some(&AttributeValue::Str("no-out".to_string()))
        );
        assert_eq!(
            box2d.attributes.get("score"),
            Some(&AttributeValue::Float(0.9))
        );
    }

    #[test]
    fn test_classification_attributes_follow_catalog_order() {
        let temp = fixture();
        let dataset = load(temp.path()).unwrap();
        let classification = dataset.segments()[0].data()[0]
            .label
            .classification
            .as_ref()
            .unwrap();

        assert_eq!(
            classification.attributes.get("daylight"),
            Some(&AttributeValue::Bool(true))
        );
        assert_eq!(
            classification.attributes.get("night"),
            Some(&AttributeValue::Bool(false))
        );
        assert_eq!(classification.attributes.len(), 10);
    }

    #[test]
    fn test_misaligned_ground_truth_is_rejected() {
        let temp = fixture();
        write_file(
            &temp.path().join(GROUND_TRUTH_DIR).join("M0101_gt.txt"),
            "1,1,10,5,20,8,0.9\n",
        );
        assert!(matches!(
            load(temp.path()),
            Err(LoaderError::MisalignedGroundTruth { .. })
        ));
    }

    #[test]
    fn test_id_mismatch_between_files_is_rejected() {
        let temp = fixture();
        write_file(
            &temp.path().join(GROUND_TRUTH_DIR).join("M0101_gt.txt"),
            "1,1,10,5,20,8,0.9\n1,9,1,2,3,4,0.5\n2,1,12,6,20,8,0.8\n",
        );
        let err = load(temp.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_wrong_attribute_count_is_rejected() {
        let temp = fixture();
        write_file(&temp.path().join(ATTRIBUTE_DIR).join("M0101_attr.txt"), "1,0\n");
        assert!(matches!(
            load(temp.path()),
            Err(LoaderError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_sequences_load_in_sorted_order() {
        let temp = fixture();
        let root = temp.path();
        // A second sequence that sorts before the first
        write_file(&root.join(IMAGE_DIR).join("M0001").join("img000001.jpg"), "");
        write_file(&root.join(ATTRIBUTE_DIR).join("M0001_attr.txt"), "0,0,0,0,0,0,0,0,0,0\n");
        write_file(&root.join(GROUND_TRUTH_DIR).join("M0001_gt.txt"), "");
        write_file(&root.join(GROUND_TRUTH_DIR).join("M0001_gt_whole.txt"), "");

        let dataset = load(root).unwrap();
        let names: Vec<&str> = dataset.segments().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["M0001", "M0101"]);
    }

    #[test]
    fn test_enum_code_out_of_range_is_rejected() {
        let temp = fixture();
        write_file(
            &temp.path().join(GROUND_TRUTH_DIR).join("M0101_gt_whole.txt"),
            "1,1,10,5,20,8,9,1,0\n1,2,1,2,3,4,1,0,2\n2,1,12,6,20,8,2,3,1\n",
        );
        assert!(matches!(
            load(temp.path()),
            Err(LoaderError::UnknownEnumCode { code: 9, .. })
        ));
    }
}
