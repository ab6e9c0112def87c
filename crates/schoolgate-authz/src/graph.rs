//! The relationship graph the engine traverses.
//!
//! The storage layer owns the records; the engine only needs lookup by id and
//! the two teacher fan-outs (homeroom classes and teaching assignments).
//! [`SchoolDirectory`] is an in-memory snapshot suitable for one request or a
//! cached view of a school.

use anyhow::anyhow;
use schoolgate_core::AppError;
use schoolgate_models::{
    Assessment, AssessmentId, Class, ClassId, ClassSubject, ClassSubjectId, NewTeachingAssignment,
    Student, StudentId, SubjectId, TeacherId,
};
use std::collections::HashMap;
use validator::Validate;

pub trait RelationshipGraph {
    fn class(&self, id: ClassId) -> Option<&Class>;

    fn student(&self, id: StudentId) -> Option<&Student>;

    fn class_subject(&self, id: ClassSubjectId) -> Option<&ClassSubject>;

    fn assessment(&self, id: AssessmentId) -> Option<&Assessment>;

    /// Every teaching assignment of the teacher, any academic year.
    fn teaching_assignments(&self, teacher: TeacherId) -> Vec<&ClassSubject>;

    /// Classes whose class teacher is `teacher`.
    fn classes_led_by(&self, teacher: TeacherId) -> Vec<&Class>;
}

/// (class, subject, academic year) of a teaching assignment.
type AssignmentKey = (ClassId, SubjectId, String);

fn assignment_key(assignment: &ClassSubject) -> AssignmentKey {
    let (class_id, subject_id, academic_year) = assignment.triple();
    (class_id, subject_id, academic_year.to_string())
}

#[derive(Debug, Default, Clone)]
pub struct SchoolDirectory {
    classes: HashMap<ClassId, Class>,
    students: HashMap<StudentId, Student>,
    class_subjects: HashMap<ClassSubjectId, ClassSubject>,
    assessments: HashMap<AssessmentId, Assessment>,
    assignments_by_teacher: HashMap<TeacherId, Vec<ClassSubjectId>>,
    assignments_by_triple: HashMap<AssignmentKey, ClassSubjectId>,
    homerooms_by_teacher: HashMap<TeacherId, Vec<ClassId>>,
}

impl SchoolDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a class, keeping the homeroom index current.
    pub fn insert_class(&mut self, class: Class) {
        if let Some(previous) = self.classes.get(&class.id) {
            if let Some(teacher) = previous.class_teacher {
                if let Some(ids) = self.homerooms_by_teacher.get_mut(&teacher) {
                    ids.retain(|id| *id != class.id);
                }
            }
        }
        if let Some(teacher) = class.class_teacher {
            self.homerooms_by_teacher
                .entry(teacher)
                .or_default()
                .push(class.id);
        }
        self.classes.insert(class.id, class);
    }

    pub fn insert_student(&mut self, student: Student) {
        self.students.insert(student.id, student);
    }

    pub fn insert_assessment(&mut self, assessment: Assessment) {
        self.assessments.insert(assessment.id, assessment);
    }

    /// Validates and records a new teaching assignment.
    pub fn add_teaching_assignment(
        &mut self,
        dto: NewTeachingAssignment,
    ) -> Result<ClassSubjectId, AppError> {
        dto.validate().map_err(AppError::unprocessable)?;
        let assignment = dto.into_assignment();
        let id = assignment.id;
        self.insert_class_subject(assignment)?;
        Ok(id)
    }

    /// Records an existing teaching assignment.
    ///
    /// Fails when another assignment already covers the same
    /// (class, subject, academic year) triple.
    pub fn insert_class_subject(&mut self, assignment: ClassSubject) -> Result<(), AppError> {
        let key = assignment_key(&assignment);
        let duplicate = self
            .assignments_by_triple
            .get(&key)
            .is_some_and(|existing| *existing != assignment.id);
        if duplicate {
            return Err(AppError::bad_request(anyhow!(
                "Class {} already has an assignment for subject {} in {}",
                assignment.class_id,
                assignment.subject_id,
                assignment.academic_year
            )));
        }

        if let Some(previous) = self.class_subjects.get(&assignment.id) {
            if let Some(ids) = self.assignments_by_teacher.get_mut(&previous.teacher_id) {
                ids.retain(|id| *id != assignment.id);
            }
            self.assignments_by_triple.remove(&assignment_key(previous));
        }
        self.assignments_by_triple.insert(key, assignment.id);
        self.assignments_by_teacher
            .entry(assignment.teacher_id)
            .or_default()
            .push(assignment.id);
        self.class_subjects.insert(assignment.id, assignment);
        Ok(())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn assignment_count(&self) -> usize {
        self.class_subjects.len()
    }
}

impl RelationshipGraph for SchoolDirectory {
    fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(&id)
    }

    fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    fn class_subject(&self, id: ClassSubjectId) -> Option<&ClassSubject> {
        self.class_subjects.get(&id)
    }

    fn assessment(&self, id: AssessmentId) -> Option<&Assessment> {
        self.assessments.get(&id)
    }

    fn teaching_assignments(&self, teacher: TeacherId) -> Vec<&ClassSubject> {
        self.assignments_by_teacher
            .get(&teacher)
            .map(|ids| ids.iter().filter_map(|id| self.class_subjects.get(id)).collect())
            .unwrap_or_default()
    }

    fn classes_led_by(&self, teacher: TeacherId) -> Vec<&Class> {
        self.homerooms_by_teacher
            .get(&teacher)
            .map(|ids| ids.iter().filter_map(|id| self.classes.get(id)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolgate_models::SchoolId;

    fn class(teacher: Option<TeacherId>) -> Class {
        Class {
            id: ClassId::new(),
            name: "Grade 10A".to_string(),
            level: 10,
            section: "A".to_string(),
            school_id: SchoolId::new(),
            class_teacher: teacher,
            academic_year: "2024-2025".to_string(),
        }
    }

    fn dto(class_id: ClassId, subject_id: SubjectId, teacher: TeacherId) -> NewTeachingAssignment {
        NewTeachingAssignment {
            class_id,
            subject_id,
            teacher_id: teacher,
            academic_year: "2024-2025".to_string(),
            periods_per_week: 4,
        }
    }

    #[test]
    fn test_homeroom_index_follows_reassignment() {
        let first = TeacherId::new();
        let second = TeacherId::new();
        let mut directory = SchoolDirectory::new();
        let mut homeroom = class(Some(first));
        directory.insert_class(homeroom.clone());
        assert_eq!(directory.classes_led_by(first).len(), 1);

        homeroom.class_teacher = Some(second);
        directory.insert_class(homeroom);
        assert!(directory.classes_led_by(first).is_empty());
        assert_eq!(directory.classes_led_by(second).len(), 1);
        assert_eq!(directory.class_count(), 1);
    }

    #[test]
    fn test_duplicate_triple_rejected() {
        let mut directory = SchoolDirectory::new();
        let class_id = ClassId::new();
        let subject_id = SubjectId::new();
        directory
            .add_teaching_assignment(dto(class_id, subject_id, TeacherId::new()))
            .unwrap();

        let err = directory
            .add_teaching_assignment(dto(class_id, subject_id, TeacherId::new()))
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(directory.assignment_count(), 1);
    }

    #[test]
    fn test_same_class_subject_other_year_allowed() {
        let mut directory = SchoolDirectory::new();
        let teacher = TeacherId::new();
        let class_id = ClassId::new();
        let subject_id = SubjectId::new();
        directory
            .add_teaching_assignment(dto(class_id, subject_id, teacher))
            .unwrap();
        let mut next_year = dto(class_id, subject_id, teacher);
        next_year.academic_year = "2025-2026".to_string();
        directory.add_teaching_assignment(next_year).unwrap();

        assert_eq!(directory.teaching_assignments(teacher).len(), 2);
    }

    #[test]
    fn test_replaced_assignment_frees_old_triple() {
        let mut directory = SchoolDirectory::new();
        let class_id = ClassId::new();
        let old_subject = SubjectId::new();
        let id = directory
            .add_teaching_assignment(dto(class_id, old_subject, TeacherId::new()))
            .unwrap();

        let mut moved = directory.class_subject(id).unwrap().clone();
        moved.subject_id = SubjectId::new();
        directory.insert_class_subject(moved.clone()).unwrap();

        // Re-inserting the same id under its current triple is an update.
        directory.insert_class_subject(moved).unwrap();

        directory
            .add_teaching_assignment(dto(class_id, old_subject, TeacherId::new()))
            .unwrap();
        assert_eq!(directory.assignment_count(), 2);
    }

    #[test]
    fn test_bulk_load_stays_linear() {
        let mut directory = SchoolDirectory::new();
        let teacher = TeacherId::new();
        let class_id = ClassId::new();
        for _ in 0..20_000 {
            directory
                .insert_class_subject(ClassSubject {
                    id: ClassSubjectId::new(),
                    class_id,
                    subject_id: SubjectId::new(),
                    teacher_id: teacher,
                    academic_year: "2024-2025".to_string(),
                    periods_per_week: 3,
                })
                .unwrap();
        }
        assert_eq!(directory.assignment_count(), 20_000);
        assert_eq!(directory.teaching_assignments(teacher).len(), 20_000);
    }

    #[test]
    fn test_invalid_assignment_rejected() {
        let mut directory = SchoolDirectory::new();
        let mut bad = dto(ClassId::new(), SubjectId::new(), TeacherId::new());
        bad.academic_year = "someday".to_string();
        let err = directory.add_teaching_assignment(bad).unwrap_err();
        assert_eq!(err.status.as_u16(), 422);
        assert_eq!(directory.assignment_count(), 0);
    }

    #[test]
    fn test_unknown_teacher_has_no_fanout() {
        let directory = SchoolDirectory::new();
        assert!(directory.teaching_assignments(TeacherId::new()).is_empty());
        assert!(directory.classes_led_by(TeacherId::new()).is_empty());
    }
}
